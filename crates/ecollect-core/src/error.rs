// ── Core error types ──
//
// User-facing errors from ecollect-core. Consumers never see raw reqwest
// errors or JSON parse failures; the `From<ecollect_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.
// Nothing here is fatal: every variant is meant to be displayed and, where
// sensible, retried by the operator.

use std::fmt;

use thiserror::Error;

/// A single violated form rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The offending form field, dotted for nested values
    /// (e.g. `capacity.max`).
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Operator-correctable form errors. Carries every violated rule,
    /// not just the first, so a form can flag all fields at once.
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<Violation>),

    /// No response from the backend; retryable by operator action.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend rejected the request.
    #[error("Server error: {message}")]
    Server {
        status: Option<u16>,
        message: String,
    },

    /// A referenced kiosk is not on the current page.
    #[error("Kiosk not found: {id}")]
    KioskNotFound { id: String },

    /// Login rejected by the backend.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The session token was rejected; forced logout has already fired.
    /// Handled globally (redirect to login), never shown as a form error.
    #[error("Session expired -- sign in again")]
    SessionExpired,

    /// Configuration problem (bad URL etc.).
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if this failure ended the session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// The violated rules, when this is a validation failure.
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ecollect_api::Error> for CoreError {
    fn from(err: ecollect_api::Error) -> Self {
        match err {
            ecollect_api::Error::Network(e) => CoreError::Network {
                message: e.to_string(),
            },
            ecollect_api::Error::Server { status, message } => CoreError::Server {
                status: Some(status),
                message,
            },
            ecollect_api::Error::Deserialization { message, body: _ } => CoreError::Server {
                status: None,
                message: format!("unexpected response from backend: {message}"),
            },
            ecollect_api::Error::Validation { violations } => CoreError::Validation(
                violations
                    .into_iter()
                    .map(|message| Violation::new("request", message))
                    .collect(),
            ),
            ecollect_api::Error::InvalidCredentials => CoreError::InvalidCredentials,
            ecollect_api::Error::SessionExpired => CoreError::SessionExpired,
            ecollect_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid backend URL: {e}"),
            },
        }
    }
}
