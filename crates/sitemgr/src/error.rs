//! CLI error types with miette diagnostics.
//!
//! Maps `sitemgr_api::Error` variants into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to {url}")]
    #[diagnostic(
        code(sitemgr::connection_failed),
        help(
            "Check network access and the base URL.\n\
             Override it with --base-url or base_url in your profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(sitemgr::timeout),
        help("Increase timeout with --timeout or check service responsiveness.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(sitemgr::auth_failed),
        help(
            "Verify your API key.\n\
             Keys are generated at: https://unifi.ui.com > Settings > API Keys"
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(sitemgr::no_credentials),
        help(
            "Pass --api-key, set SITEMGR_API_KEY, or add api_key / api_key_env\n\
             to [profiles.{profile}] in your config file."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("Not found: {endpoint}")]
    #[diagnostic(
        code(sitemgr::not_found),
        help("Run: sitemgr sites to see available site IDs")
    )]
    NotFound { endpoint: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(sitemgr::api_error))]
    ApiError { status: u16, message: String },

    #[error(transparent)]
    #[diagnostic(code(sitemgr::api))]
    Api(sitemgr_api::Error),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sitemgr::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(sitemgr::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(sitemgr::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── sitemgr_api::Error → CliError mapping ────────────────────────────

impl From<sitemgr_api::Error> for CliError {
    fn from(err: sitemgr_api::Error) -> Self {
        use sitemgr_api::Error as ApiErr;

        if err.is_auth_error() {
            return Self::AuthFailed {
                message: err.to_string(),
            };
        }

        match err {
            ApiErr::Transport(e) if e.is_timeout() => Self::Timeout {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
            },
            ApiErr::Transport(e) if e.is_connect() => Self::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                source: Box::new(e),
            },
            ApiErr::Api {
                status: 404,
                endpoint,
                ..
            } => Self::NotFound { endpoint },
            ApiErr::Api {
                status, message, ..
            } => Self::ApiError { status, message },
            ApiErr::InvalidUrl(e) => Self::Validation {
                field: "base_url".into(),
                reason: e.to_string(),
            },
            other => Self::Api(other),
        }
    }
}
