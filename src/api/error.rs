//! API Error Types
//!
//! Classifies failed admin API calls into the handful of cases the
//! dashboard distinguishes, and turns them into user-facing messages.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Message shown when the server rejects the bearer token
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Please log in again.";

/// Message shown when the requested resource does not exist
pub const NOT_FOUND_MESSAGE: &str = "Requested data was not found.";

/// Admin API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP 401
    #[error("Unauthorized. Please log in again.")]
    Unauthorized,

    /// HTTP 404
    #[error("Requested data was not found.")]
    NotFound,

    /// Non-2xx response carrying a `message` field
    #[error("{0}")]
    Server(String),

    /// Non-2xx response without a usable message
    #[error("{0}")]
    Failure(String),

    /// Network-level failure (connect, DNS, broken stream)
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// 2xx response whose body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for a notification, falling back to `default` when the error
    /// carries no text of its own
    pub fn user_message(&self, default: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            default.to_string()
        } else {
            message
        }
    }

    /// HTTP status behind this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::NotFound => Some(404),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Value,
}

/// Text of a `message` field, or `None` when it is null, false, zero or empty
fn message_text(message: &Value) -> Option<String> {
    match message {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Classify a non-2xx response
///
/// 401 and 404 short-circuit without reading the body. Anything else uses
/// the body's `message` field when it carries any text, `default_message`
/// otherwise. Non-string messages are rendered as JSON.
pub async fn handle_api_error(response: Response, default_message: &str) -> ApiError {
    match response.status() {
        StatusCode::UNAUTHORIZED => return ApiError::Unauthorized,
        StatusCode::NOT_FOUND => return ApiError::NotFound,
        _ => {}
    }

    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => match message_text(&body.message) {
            Some(message) => ApiError::Server(message),
            None => ApiError::Failure(default_message.to_string()),
        },
        Err(e) => {
            tracing::debug!(status = %status, error = %e, "Error body is not JSON");
            ApiError::Failure(default_message.to_string())
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
