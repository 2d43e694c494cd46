//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use pharmadesk_config::ConfigError;
use pharmadesk_core::CoreError;

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
    #[error("Could not connect to the backend at {url}")]
    #[diagnostic(
        code(pharmadesk::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Set the URL with --api-url or: pharmadesk config set-url <URL>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(pharmadesk::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Invalid username or password")]
    #[diagnostic(code(pharmadesk::login_failed), help("Check the e-mail and password and try again."))]
    LoginFailed,

    #[error("Login required for '{route}'")]
    #[diagnostic(code(pharmadesk::login_required), help("Run: pharmadesk login"))]
    LoginRequired { route: String },

    #[error("Session expired: {message}")]
    #[diagnostic(
        code(pharmadesk::session_expired),
        help("The stored token was rejected and has been forgotten. Run: pharmadesk login")
    )]
    SessionExpired { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(pharmadesk::not_found),
        help("Run: pharmadesk {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(pharmadesk::api_error))]
    Api { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Missing required fields: {fields}")]
    #[diagnostic(code(pharmadesk::missing_fields), help("Pass each missing field as a flag; see --help."))]
    MissingFields { fields: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pharmadesk::validation))]
    Validation { field: String, reason: String },

    #[error("No shifts to send")]
    #[diagnostic(
        code(pharmadesk::nothing_to_send),
        help("Pick a month (--month) or code (--code) that has shifts.")
    )]
    NothingToSend,

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(pharmadesk::config))]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(pharmadesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Internal / IO ────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(pharmadesk::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::LoginFailed | Self::LoginRequired { .. } | Self::SessionExpired { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::MissingFields { .. }
            | Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::Config(ConfigError::Validation { .. }) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::LoginFailed { .. } => Self::LoginFailed,
            CoreError::LoginRequired { route } => Self::LoginRequired { route },
            CoreError::SessionExpired { message } => Self::SessionExpired { message },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: list_command(&entity_type),
                resource_type: entity_type,
                identifier,
            },

            CoreError::MissingFields { fields } => Self::MissingFields {
                fields: fields.join(", "),
            },
            CoreError::InvalidField { field, reason } => Self::Validation { field, reason },
            CoreError::UnknownField { field } => Self::Validation {
                field,
                reason: "unknown field".into(),
            },
            CoreError::NothingToSend => Self::NothingToSend,

            CoreError::Api { message, .. } => Self::Api { message },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },

            err @ CoreError::FormAlreadyOpen => Self::Internal(err.to_string()),
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

fn list_command(entity_type: &str) -> String {
    match entity_type {
        "pharmacy" => "pharmacies list".into(),
        other => format!("{other}s list"),
    }
}
