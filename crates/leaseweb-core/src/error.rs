// ── Core error types ──
//
// Domain errors surfaced to the provider layer. The `From<leaseweb_api::Error>`
// impl is where the error funnel runs: the operator-facing message is decided
// here, once, for every failed remote call.

use thiserror::Error;

use crate::funnel::{self, ErrorClass};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote errors ────────────────────────────────────────────────
    #[error("{message}")]
    Api {
        class: ErrorClass,
        message: String,
        /// HTTP status code, when the remote answered.
        status: Option<u16>,
        /// The remote's `errorCode`, if the body carried one.
        code: Option<String>,
        correlation_id: Option<String>,
        /// `attribute: message` lines from `errorDetails`.
        details: Vec<String>,
    },

    #[error("Invalid response from API: {message}")]
    InvalidResponse { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String, detail: String },

    #[error("Cancelled before {operation}")]
    Cancelled { operation: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Diagnostic summary line for this error.
    pub fn summary(&self) -> String {
        match self {
            Self::Api { class, .. } => format!("Leaseweb API {class}"),
            Self::InvalidResponse { .. } => "Invalid response from Leaseweb API".into(),
            Self::Unsupported { .. } => "Unsupported action".into(),
            Self::Cancelled { .. } => "Operation cancelled".into(),
            Self::Config { .. } => "Provider configuration error".into(),
        }
    }

    /// Diagnostic detail: the message plus any per-attribute details.
    pub fn detail(&self) -> String {
        match self {
            Self::Api {
                message, details, ..
            } if !details.is_empty() => {
                let mut out = message.clone();
                for line in details {
                    out.push('\n');
                    out.push_str(line);
                }
                out
            }
            Self::Api { message, .. } => message.clone(),
            Self::Unsupported { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn unsupported(operation: &str, detail: &str) -> Self {
        Self::Unsupported {
            operation: operation.to_owned(),
            detail: detail.to_owned(),
        }
    }
}

// ── Conversion from adapter errors ───────────────────────────────────

impl From<leaseweb_api::Error> for CoreError {
    fn from(err: leaseweb_api::Error) -> Self {
        let class = ErrorClass::of(&err);
        match err {
            leaseweb_api::Error::Api { ref response, .. } => {
                let body = funnel::error_body(Some(response));
                let message = funnel::error_message(&err.to_string(), Some(response));
                let details = body.as_ref().map(funnel::detail_lines).unwrap_or_default();
                let (code, correlation_id) = body
                    .map(|b| (b.error_code, b.correlation_id))
                    .unwrap_or_default();
                CoreError::Api {
                    class,
                    message,
                    status: Some(response.status),
                    code,
                    correlation_id,
                    details,
                }
            }
            leaseweb_api::Error::Transport(ref e) => CoreError::Api {
                class,
                message: funnel::error_message(&err.to_string(), None),
                status: e.status().map(|s| s.as_u16()),
                code: None,
                correlation_id: None,
                details: Vec::new(),
            },
            leaseweb_api::Error::Deserialization { message, .. } => {
                CoreError::InvalidResponse { message }
            }
            leaseweb_api::Error::InvalidToken { message } => CoreError::Config { message },
            leaseweb_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            leaseweb_api::Error::CannotBeABase(url) => CoreError::Config {
                message: format!("Base URL cannot carry API paths: {url}"),
            },
        }
    }
}
