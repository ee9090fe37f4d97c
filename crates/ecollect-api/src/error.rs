use thiserror::Error;

/// Coarse classification of a transport-layer failure.
///
/// Every [`Error`] variant maps onto exactly one kind; consumers that only
/// care about "can the operator retry this?" branch on the kind instead of
/// the full variant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received at all.
    Network,
    /// The backend responded, but with an error.
    Server,
    /// Rejected locally before dispatch; the request never hit the wire.
    Validation,
}

/// Top-level error type for the `ecollect-api` crate.
///
/// `ecollect-core` maps these into user-facing diagnostics; nothing here is
/// shown to the operator verbatim except backend-provided messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Backend ─────────────────────────────────────────────────────
    /// The backend rejected the request with an error payload.
    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// Login rejected (wrong username or password).
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The session token was rejected (expired or revoked). By the time
    /// this surfaces the client has already forced the session out.
    #[error("Session expired -- sign in again")]
    SessionExpired,

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Local ───────────────────────────────────────────────────────
    /// Pre-dispatch rejection of missing or malformed parameters.
    /// Aggregates every violated rule, not just the first.
    #[error("Validation failed: {}", violations.join("; "))]
    Validation { violations: Vec<String> },
}

impl Error {
    /// Classify this error into the uniform NETWORK / SERVER / VALIDATION
    /// taxonomy the view layer displays.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Validation { .. } | Self::InvalidUrl(_) => ErrorKind::Validation,
            Self::Server { .. }
            | Self::InvalidCredentials
            | Self::SessionExpired
            | Self::Deserialization { .. } => ErrorKind::Server,
        }
    }

    /// Returns `true` if this failure ended the session (forced logout
    /// already fired).
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Returns `true` if retrying the same request might succeed
    /// (transient transport conditions only).
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Build a single-rule validation error.
    pub(crate) fn validation(rule: impl Into<String>) -> Self {
        Self::Validation {
            violations: vec![rule.into()],
        }
    }
}
