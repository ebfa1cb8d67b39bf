//! CLI error types with miette diagnostics.
//!
//! Maps `ovpncloud_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ovpncloud_api::{Error as ApiError, ResourceKind};
use ovpncloud_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the OpenVPN Cloud API")]
    #[diagnostic(
        code(ovpncloud::connection_failed),
        help("Check the tenant URL and your network.\nTry a longer --timeout if the API is slow.")
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(ovpncloud::tls_error),
        help("Check ca_cert in your profile, or use --insecure (-k) for testing only.")
    )]
    Tls { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed (HTTP {status})")]
    #[diagnostic(
        code(ovpncloud::auth_failed),
        help("Verify the API token for profile '{profile}'.\nTokens expire; request a fresh one.")
    )]
    AuthFailed { status: u16, profile: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(ovpncloud::no_credentials),
        help("Set OVPNCLOUD_API_TOKEN, pass --api-token, or add api_token_env to the profile.")
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{kind} '{id}' not found")]
    #[diagnostic(
        code(ovpncloud::not_found),
        help("Run: ovpncloud {list_command} to see what exists")
    )]
    NotFound {
        kind: ResourceKind,
        id: String,
        list_command: String,
    },

    #[error("{kind} '{id}' is still present after {attempts} delete attempts")]
    #[diagnostic(
        code(ovpncloud::delete_not_confirmed),
        help(
            "The API accepted the delete but kept returning the entity.\n\
             Last observed state:\n{last_seen}"
        )
    )]
    DeleteNotConfirmed {
        kind: ResourceKind,
        id: String,
        attempts: u32,
        last_seen: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(ovpncloud::api_error))]
    Api { status: u16, message: String },

    #[error("Unexpected response from the API: {message}")]
    #[diagnostic(code(ovpncloud::bad_response), help("Re-run with -vv to log the request."))]
    BadResponse { message: String },

    #[error("Operation cancelled")]
    #[diagnostic(code(ovpncloud::cancelled))]
    Cancelled,

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ovpncloud::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ovpncloud::profile_not_found),
        help("Available profiles: {available}\nCreate one with: ovpncloud config init")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No tenant configured")]
    #[diagnostic(
        code(ovpncloud::no_config),
        help("Pass --base-url, or create a profile with: ovpncloud config init\nExpected at: {path}")
    )]
    NoConfig { path: String },

    #[error("Could not read configuration: {reason}")]
    #[diagnostic(
        code(ovpncloud::config_invalid),
        help("Fix or move the file at {path}. It has not been modified.")
    )]
    ConfigInvalid { path: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(ovpncloud::config))]
    Config(ConfigError),

    // ── Serialization ────────────────────────────────────────────────
    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(ovpncloud::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Tls { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::DeleteNotConfirmed { .. } | Self::Api { status: 409, .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::ConfigInvalid { .. } => exit_code::USAGE,
            Self::Cancelled => exit_code::CANCELLED,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the active profile name to auth failures.
    pub fn with_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { status, .. } => Self::AuthFailed {
                status,
                profile: name.into(),
            },
            other => other,
        }
    }
}

fn list_command(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Connector => "connectors list",
        ResourceKind::Route => "routes list <network>",
        ResourceKind::DnsRecord => "dns get <id>",
        ResourceKind::Network => "networks list",
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(_) => Self::ConnectionFailed { source: err },

            ApiError::InvalidUrl(e) => Self::Validation {
                field: "base_url".into(),
                reason: e.to_string(),
            },

            ApiError::Tls(reason) => Self::Tls { reason },

            ApiError::InvalidToken(reason) => Self::Validation {
                field: "api_token".into(),
                reason,
            },

            ApiError::InvalidPathSegment(id) => Self::Validation {
                field: "id".into(),
                reason: format!("{id:?} cannot be used as a resource id"),
            },

            ApiError::Cancelled => Self::Cancelled,

            ApiError::Unauthorized { status } => Self::AuthFailed {
                status,
                profile: "current".into(),
            },

            ApiError::NotFound { kind, id } => Self::NotFound {
                kind,
                id,
                list_command: list_command(kind).into(),
            },

            ApiError::Api { status, message } => Self::Api { status, message },

            ApiError::Deserialization { message, .. } => Self::BadResponse { message },

            ApiError::MissingId { kind } => Self::Validation {
                field: "id".into(),
                reason: format!("{kind} has no id"),
            },

            ApiError::DeleteNotConfirmed {
                kind,
                id,
                attempts,
                last_seen,
            } => Self::DeleteNotConfirmed {
                kind,
                id,
                attempts,
                last_seen: serde_json::to_string_pretty(&last_seen)
                    .unwrap_or_else(|_| last_seen.to_string()),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::UnknownProfile { profile } => Self::ProfileNotFound {
                name: profile,
                available: "(none)".into(),
            },
            ConfigError::Figment(e) => Self::ConfigInvalid {
                path: ovpncloud_config::config_path().display().to_string(),
                reason: e.to_string(),
            },
            other => Self::Config(other),
        }
    }
}
