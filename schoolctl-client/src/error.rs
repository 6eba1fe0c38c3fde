//! Client error type

use reqwest::StatusCode;
use thiserror::Error;

/// Shown when the server's error body carries no message
pub const FALLBACK_MESSAGE: &str = "unexpected error, please try again";

#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or undecodable response
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer; `message` is the server's own text when it sent one
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// A protected route was called before logging in
    #[error("not authorized: missing token")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Build an API error from a status and raw response body.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_owned))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        Self::Api { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            Self::MissingToken => Some(StatusCode::UNAUTHORIZED),
        }
    }

    /// Text fit for showing to a user
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::MissingToken => self.to_string(),
            Self::Http(_) => FALLBACK_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_comes_from_body() {
        let err = ClientError::from_body(
            StatusCode::CONFLICT,
            r#"{"error":"conflict","message":"a student with this email already exists"}"#,
        );
        assert_eq!(err.to_string(), "a student with this email already exists");
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn falls_back_without_message() {
        let err = ClientError::from_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);

        let err = ClientError::from_body(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"x"}"#);
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }
}
