use reqwest::StatusCode;

use crate::messages::{Locale, Message};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The `message` field of the backend's error body, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Text to show the user: the server's message verbatim, otherwise the
    /// fixed fallback for the failed action.
    pub fn user_message(&self, fallback: Message, locale: Locale) -> String {
        match self.server_message() {
            Some(message) => message.to_string(),
            None => fallback.text(locale).to_string(),
        }
    }
}
