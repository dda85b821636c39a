// Immutable connection settings for the Site Manager API.

use std::time::Duration;

use secrecy::SecretString;

/// Public Site Manager endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.ui.com";

/// API version segment used when none is given.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Per-request deadline handed to the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a [`SiteManagerClient`](crate::SiteManagerClient).
///
/// Assembled once with the `with_*` methods, then moved into the client.
/// Nothing mutates it afterwards; every request reads the same values.
#[derive(Debug, Clone)]
pub struct SiteManagerConfig {
    api_key: SecretString,
    version: String,
    base_url: String,
    verify_tls: bool,
    timeout: Duration,
}

impl SiteManagerConfig {
    /// Settings for the public service with the given API key.
    ///
    /// Generated at: <https://unifi.ui.com> > Settings > API Keys.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
            version: DEFAULT_API_VERSION.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            verify_tls: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API version segment (e.g. `"ea"`).
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Override the base URL. Trailing slashes are stripped.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_owned();
        self
    }

    /// Enable or disable TLS certificate verification.
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_point_at_public_service() {
        let cfg = SiteManagerConfig::new("key-123");

        assert_eq!(cfg.base_url(), "https://api.ui.com");
        assert_eq!(cfg.version(), "v1");
        assert!(cfg.verify_tls());
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.api_key().expose_secret(), "key-123");
    }

    #[test]
    fn base_url_trailing_slashes_are_stripped() {
        let cfg = SiteManagerConfig::new("k").with_base_url("https://api.ui.com//");
        assert_eq!(cfg.base_url(), "https://api.ui.com");
    }

    #[test]
    fn debug_output_redacts_key() {
        let cfg = SiteManagerConfig::new("super-secret-key");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("super-secret-key"), "{dbg}");
    }

    #[test]
    fn overrides_apply() {
        let cfg = SiteManagerConfig::new("k")
            .with_version("ea")
            .with_verify_tls(false)
            .with_timeout(Duration::from_secs(5));

        assert_eq!(cfg.version(), "ea");
        assert!(!cfg.verify_tls());
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
    }
}
