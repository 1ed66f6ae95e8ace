use thiserror::Error;

/// The HTTP response envelope attached to a failed API call.
///
/// `body` is `None` when the body could not be read off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Option<String>,
}

impl HttpResponse {
    /// Canonical status line, e.g. `"404 Not Found"`.
    pub fn status_line(&self) -> String {
        match reqwest::StatusCode::from_u16(self.status) {
            Ok(code) => code.to_string(),
            Err(_) => self.status.to_string(),
        }
    }
}

/// Top-level error type for the `leaseweb-api` crate.
///
/// Covers every failure mode of the adapter: token handling, transport,
/// non-2xx responses from the remote, and undecodable bodies.
/// `leaseweb-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The configured token cannot be sent as a header value.
    #[error("Invalid API token: {message}")]
    InvalidToken { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API paths: {0}")]
    CannotBeABase(String),

    // ── Remote ──────────────────────────────────────────────────────
    /// Non-2xx response from the remote API.
    #[error("{status_line}")]
    Api {
        response: HttpResponse,
        status_line: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    pub(crate) fn api(status: u16, body: Option<String>) -> Self {
        let response = HttpResponse { status, body };
        let status_line = response.status_line();
        Self::Api {
            response,
            status_line,
        }
    }

    /// The HTTP response envelope, when the remote answered.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Api { response, .. } => Some(response),
            _ => None,
        }
    }

    /// HTTP status code of the failed call, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { response, .. } => Some(response.status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

}
