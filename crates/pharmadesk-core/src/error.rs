// ── Core error types ──
//
// User-facing errors from pharmadesk-core. Consumers never see raw HTTP
// plumbing: the `From<pharmadesk_api::Error>` impl translates transport
// failures into domain variants, and server-reported messages are carried
// verbatim so forms can show them inline.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    /// Login rejected. The server's wording is kept for logs only.
    #[error("invalid username or password")]
    LoginFailed { reason: String },

    #[error("Session rejected by backend ({message}); log in again")]
    SessionExpired { message: String },

    #[error("Login required to open {route}")]
    LoginRequired { route: String },

    // ── Form errors ──────────────────────────────────────────────────
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("unknown field: {field}")]
    UnknownField { field: String },

    #[error("A form is already open on this page")]
    FormAlreadyOpen,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("no shifts to send")]
    NothingToSend,

    // ── API errors (server message kept verbatim) ────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pharmadesk_api::Error> for CoreError {
    fn from(err: pharmadesk_api::Error) -> Self {
        match err {
            pharmadesk_api::Error::Authentication { message } => {
                CoreError::LoginFailed { reason: message }
            }
            pharmadesk_api::Error::Unauthorized { message } => {
                CoreError::SessionExpired { message }
            }
            pharmadesk_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            pharmadesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            pharmadesk_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            pharmadesk_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            pharmadesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
