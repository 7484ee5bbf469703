use serde_json::Value;

use crate::i18n::{Locale, Text, tr};

/// Why a submission did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The server answered non-2xx and explained why.
    #[error("server rejected submission ({status}): {message}")]
    Server { status: u16, message: String },

    /// The server answered non-2xx without an explanation.
    #[error("server rejected submission ({status})")]
    Rejected { status: u16 },

    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered 2xx with a body we could not decode.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl SubmitError {
    /// Classifies a non-2xx response from its status and raw body.
    ///
    /// `detail` wins over `message`. A `detail` list of validation objects
    /// is reduced to their `msg` fields.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| server_message(&value));
        match message {
            Some(message) => SubmitError::Server { status, message },
            None => SubmitError::Rejected { status },
        }
    }

    /// The text shown to the user.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            SubmitError::Server { message, .. } => message.clone(),
            SubmitError::Rejected { .. } | SubmitError::InvalidResponse(_) => {
                tr(locale, Text::SubmitFailed).to_string()
            }
            SubmitError::Network(_) => tr(locale, Text::NetworkError).to_string(),
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmitError::Server { status, .. } | SubmitError::Rejected { status } => Some(*status),
            SubmitError::Network(_) | SubmitError::InvalidResponse(_) => None,
        }
    }
}

fn server_message(body: &Value) -> Option<String> {
    ["detail", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(field_text))
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}
