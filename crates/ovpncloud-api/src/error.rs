use thiserror::Error;

use crate::models::ResourceKind;

/// Top-level error type for the `ovpncloud-api` crate.
///
/// Lookups that find nothing are not errors: they come back as `Ok(None)`.
/// Everything here is a real failure that the caller has to surface.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The bearer token cannot be encoded as a header value.
    #[error("Invalid API token: {0}")]
    InvalidToken(String),

    /// An id cannot be used as a path segment (empty, `.` or `..`).
    #[error("Invalid resource id: {0:?}")]
    InvalidPathSegment(String),

    /// The operation was cancelled through the client's cancellation token.
    #[error("Operation cancelled")]
    Cancelled,

    // ── API ─────────────────────────────────────────────────────────
    /// The API rejected our credentials (HTTP 401/403).
    #[error("Unauthorized (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-success response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A single-object fetch addressed an entity that does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: ResourceKind, id: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// An update or delete was requested for an entity that has no id yet.
    #[error("{kind} has no id; it must be created before it can be modified")]
    MissingId { kind: ResourceKind },

    // ── Reconciliation ──────────────────────────────────────────────
    /// The entity was still observable after every delete attempt.
    #[error("{kind} '{id}' still present after {attempts} delete attempts")]
    DeleteNotConfirmed {
        kind: ResourceKind,
        id: String,
        attempts: u32,
        /// JSON of the entity as last read back from the API.
        last_seen: Box<serde_json::Value>,
    },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Api { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status behind this error, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status } | Self::Api { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
