use thiserror::Error;

/// Top-level error type for the `sitemgr-api` crate.
///
/// Every failure surfaces here unchanged: the paginator never wraps a
/// transport error in a pagination-specific one.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The API key cannot be sent as an HTTP header value.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Invalid API key (rejected by the Site Manager service).
    #[error("Invalid API key (rejected on {endpoint})")]
    InvalidApiKey { endpoint: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success HTTP status from the Site Manager API.
    #[error("Site Manager API error on {endpoint} (HTTP {status}): {message}")]
    Api {
        status: u16,
        endpoint: String,
        message: String,
        code: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// The response body was not JSON, or not the shape the endpoint promises.
    #[error("Deserialization error on {endpoint}: {message}")]
    Deserialization {
        endpoint: String,
        message: String,
        body: String,
    },
}

impl Error {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::InvalidApiKey { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the service refused our credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::InvalidApiKey { .. })
            || self.status() == Some(403)
    }

    /// Returns `true` if the request deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the service could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

    /// Extract the API error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_reports_status_and_endpoint() {
        let err = Error::Api {
            status: 404,
            endpoint: "sites/nope/devices".into(),
            message: "Not Found".into(),
            code: Some("api.err.NotFound".into()),
        };

        assert!(err.is_not_found());
        assert!(!err.is_auth_error());
        assert_eq!(err.api_error_code(), Some("api.err.NotFound"));
        let text = err.to_string();
        assert!(text.contains("404"), "{text}");
        assert!(text.contains("sites/nope/devices"), "{text}");
    }

    #[test]
    fn invalid_api_key_is_auth_error() {
        let err = Error::InvalidApiKey {
            endpoint: "sites".into(),
        };
        assert!(err.is_auth_error());
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_timeout());
    }

    #[test]
    fn forbidden_is_auth_error() {
        let err = Error::Api {
            status: 403,
            endpoint: "sites".into(),
            message: "Forbidden".into(),
            code: None,
        };
        assert!(err.is_auth_error());
        assert_eq!(err.api_error_code(), None);
    }
}
