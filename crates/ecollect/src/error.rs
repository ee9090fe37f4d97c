//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text and stable process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use ecollect_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Session ──────────────────────────────────────────────────────

    #[error("Not signed in")]
    #[diagnostic(
        code(ecollect::not_signed_in),
        help("Sign in first: ecollect login")
    )]
    NotSignedIn,

    #[error("Invalid username or password")]
    #[diagnostic(
        code(ecollect::invalid_credentials),
        help("Check the operator account and try again.")
    )]
    InvalidCredentials,

    #[error("Session expired")]
    #[diagnostic(
        code(ecollect::session_expired),
        help("The backend rejected the stored token. Sign in again: ecollect login")
    )]
    SessionExpired,

    // ── Input ────────────────────────────────────────────────────────

    #[error("Validation failed:\n{details}")]
    #[diagnostic(
        code(ecollect::validation),
        help("Fix the flagged fields and resubmit.")
    )]
    Validation { details: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ecollect::usage))]
    InvalidArgument { field: String, reason: String },

    #[error("Destructive operation requires confirmation")]
    #[diagnostic(
        code(ecollect::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    ConfirmationRequired,

    // ── Backend ──────────────────────────────────────────────────────

    #[error("Could not reach the backend: {message}")]
    #[diagnostic(
        code(ecollect::connection),
        help("Check that the server is running and --server points at it.")
    )]
    Connection { message: String },

    #[error("Backend error: {message}")]
    #[diagnostic(code(ecollect::server))]
    Server { message: String },

    #[error("Kiosk '{id}' not found on the current page")]
    #[diagnostic(code(ecollect::not_found), help("Run: ecollect kiosks list"))]
    KioskNotFound { id: String },

    // ── Configuration / IO ───────────────────────────────────────────

    #[error("Configuration error: {message}")]
    #[diagnostic(code(ecollect::config))]
    BadConfig { message: String },

    #[error(transparent)]
    #[diagnostic(code(ecollect::config))]
    ConfigFile(#[from] ecollect_config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to a process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotSignedIn | Self::InvalidCredentials | Self::SessionExpired => exit_code::AUTH,
            Self::Validation { .. }
            | Self::InvalidArgument { .. }
            | Self::ConfirmationRequired => exit_code::USAGE,
            Self::KioskNotFound { .. } => exit_code::NOT_FOUND,
            Self::Connection { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(violations) => CliError::Validation {
                details: violations
                    .iter()
                    .map(|v| format!("  - {v}"))
                    .collect::<Vec<_>>()
                    .join("\n"),
            },
            CoreError::Network { message } => CliError::Connection { message },
            CoreError::Server { status, message } => CliError::Server {
                message: match status {
                    Some(status) => format!("{message} (HTTP {status})"),
                    None => message,
                },
            },
            CoreError::KioskNotFound { id } => CliError::KioskNotFound { id },
            CoreError::InvalidCredentials => CliError::InvalidCredentials,
            CoreError::SessionExpired => CliError::SessionExpired,
            CoreError::Config { message } => CliError::BadConfig { message },
        }
    }
}
