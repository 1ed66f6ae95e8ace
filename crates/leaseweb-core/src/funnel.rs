// ── Error funnel ──
//
// Turns a failed adapter call into the one-line message shown to the
// operator. The remote's own `errorMessage` wins whenever it is there;
// anything else falls back to the transport-level text.

use leaseweb_api::HttpResponse;
use leaseweb_api::types::ApiErrorBody;

/// Coarse classification of a failed call, used as the diagnostic summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
pub enum ErrorClass {
    #[strum(serialize = "client error")]
    Client,
    #[strum(serialize = "server error")]
    Server,
    #[strum(serialize = "transport error")]
    Transport,
    #[strum(serialize = "invalid response")]
    InvalidResponse,
    #[strum(serialize = "configuration error")]
    Config,
}

impl ErrorClass {
    pub fn of(err: &leaseweb_api::Error) -> Self {
        match err {
            leaseweb_api::Error::Api { response, .. } if response.status >= 500 => Self::Server,
            leaseweb_api::Error::Api { .. } => Self::Client,
            leaseweb_api::Error::Transport(_) => Self::Transport,
            leaseweb_api::Error::Deserialization { .. } => Self::InvalidResponse,
            leaseweb_api::Error::InvalidToken { .. }
            | leaseweb_api::Error::InvalidUrl(_)
            | leaseweb_api::Error::CannotBeABase(_) => Self::Config,
        }
    }
}

/// Decode the remote error envelope of a failed (status >= 400) response.
///
/// Returns `None` for successful statuses, unreadable bodies, and bodies
/// that are not a JSON object. Within an object, each field is read on its
/// own, so a malformed `errorCode` never costs the `errorMessage`.
pub fn error_body(response: Option<&HttpResponse>) -> Option<ApiErrorBody> {
    let response = response.filter(|r| r.status >= 400)?;
    let body = response.body.as_deref()?;
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ApiErrorBody::from_json(&value)
}

/// The operator-facing message for a failed call.
pub fn error_message(transport_message: &str, response: Option<&HttpResponse>) -> String {
    error_body(response)
        .and_then(|body| body.error_message)
        .unwrap_or_else(|| transport_message.to_owned())
}

/// Flatten `errorDetails` into `attribute: message` lines, sorted by attribute.
pub fn detail_lines(body: &ApiErrorBody) -> Vec<String> {
    body.error_details
        .iter()
        .flat_map(|(attr, messages)| messages.iter().map(move |m| format!("{attr}: {m}")))
        .collect()
}
