//! CLI configuration: TOML profiles and credential resolution.
//!
//! Values resolve flag > env > profile > built-in default. The API key
//! additionally checks the profile's `api_key_env` and the OS keyring
//! before falling back to a plaintext key in the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use sitemgr_api::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, SiteManagerConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

const KEYRING_SERVICE: &str = "sitemgr";

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            profiles: HashMap::new(),
        }
    }
}

/// A named API profile. Every field is optional.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://api.ui.com").
    pub base_url: Option<String>,

    /// API version path segment (e.g., "v1").
    pub api_version: Option<String>,

    /// Plaintext API key, used only when no other source provides one.
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Skip TLS certificate verification.
    pub insecure: Option<bool>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `--config` wins, then XDG / platform conventions.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    if let Some(ref path) = global.config {
        return path.clone();
    }
    ProjectDirs::from("com", "sitemgr", "sitemgr").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("sitemgr");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from file + `SITEMGR_` environment (`__` separates nesting).
///
/// A missing file yields the defaults; a malformed one is an error.
pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SITEMGR_").split("__"));

    Ok(figment.extract()?)
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Translate the active profile + global flags into a `SiteManagerConfig`.
///
/// An explicitly requested profile must exist; the implicit default may be
/// absent, in which case flags and env vars carry everything.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<SiteManagerConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let fallback = Profile::default();
    let profile = match config.profiles.get(&profile_name) {
        Some(p) => p,
        None if global.profile.is_some() => {
            let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        None => &fallback,
    };

    let api_key = resolve_api_key(profile, &profile_name, global)?;

    let base_url = global
        .base_url
        .as_deref()
        .or(profile.base_url.as_deref())
        .unwrap_or(DEFAULT_BASE_URL);

    let version = global
        .api_version
        .as_deref()
        .or(profile.api_version.as_deref())
        .unwrap_or(DEFAULT_API_VERSION);

    let insecure = global.insecure || profile.insecure.unwrap_or(false);

    let timeout = global
        .timeout
        .or(profile.timeout)
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

    tracing::debug!(
        profile = %profile_name,
        base_url,
        version,
        insecure,
        "resolved API configuration"
    );

    Ok(SiteManagerConfig::new(api_key)
        .with_base_url(base_url)
        .with_version(version)
        .with_verify_tls(!insecure)
        .with_timeout(timeout))
}

/// Resolve an API key from the credential chain.
///
/// 1. `--api-key` / `SITEMGR_API_KEY`
/// 2. The env var named by the profile's `api_key_env`
/// 3. System keyring (`sitemgr`, `<profile>/api-key`)
/// 4. Plaintext `api_key` in the profile
pub fn resolve_api_key(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = global.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["sitemgr"];
        argv.extend_from_slice(args);
        argv.push("sites");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        Config {
            default_profile: Some(name.into()),
            profiles: HashMap::from([(name.to_owned(), profile)]),
        }
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with(
            "home",
            Profile {
                base_url: Some("https://profile.example".into()),
                api_version: Some("v1".into()),
                api_key: Some("profile-key".into()),
                timeout: Some(5),
                ..Profile::default()
            },
        );
        let g = global(&[
            "--base-url",
            "https://flag.example/",
            "--api-key",
            "flag-key",
            "--api-version",
            "ea",
            "--timeout",
            "9",
        ]);

        let resolved = resolve(&g, &cfg).unwrap();

        assert_eq!(resolved.base_url(), "https://flag.example");
        assert_eq!(resolved.version(), "ea");
        assert_eq!(resolved.api_key().expose_secret(), "flag-key");
        assert_eq!(resolved.timeout(), Duration::from_secs(9));
        assert!(resolved.verify_tls());
    }

    #[test]
    fn profile_values_fill_in_when_flags_absent() {
        let cfg = config_with(
            "home",
            Profile {
                base_url: Some("https://profile.example".into()),
                api_key: Some("profile-key".into()),
                insecure: Some(true),
                ..Profile::default()
            },
        );

        let resolved = resolve(&global(&[]), &cfg).unwrap();

        assert_eq!(resolved.base_url(), "https://profile.example");
        assert_eq!(resolved.version(), DEFAULT_API_VERSION);
        assert_eq!(resolved.api_key().expose_secret(), "profile-key");
        assert!(!resolved.verify_tls());
        assert_eq!(resolved.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn missing_explicit_profile_is_an_error() {
        let cfg = config_with("home", Profile::default());
        let err = resolve(&global(&["--profile", "work", "--api-key", "k"]), &cfg).unwrap_err();

        match err {
            CliError::ProfileNotFound { name, available } => {
                assert_eq!(name, "work");
                assert_eq!(available, "home");
            }
            other => panic!("expected ProfileNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn implicit_default_profile_may_be_absent() {
        let resolved = resolve(&global(&["--api-key", "k"]), &Config::default()).unwrap();
        assert_eq!(resolved.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn toml_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
default_profile = "lab"

[profiles.lab]
base_url = "https://lab.example"
api_key = "lab-key"
timeout = 12
"#
        )
        .unwrap();

        let cfg = load_config(file.path()).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
        let lab = &cfg.profiles["lab"];
        assert_eq!(lab.base_url.as_deref(), Some("https://lab.example"));
        assert_eq!(lab.timeout, Some(12));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
    }
}
