//! Claude API client for the AI hair analysis.
//!
//! A single non-streaming call to the Anthropic Messages API with a system
//! prompt, one photo and one instruction.

mod client;
pub mod types;

pub use client::ClaudeClient;
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message, ResponseBlock};

use thiserror::Error;

/// Errors that can occur when interacting with the Claude API.
#[derive(Debug, Error)]
pub enum ClaudeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Claude API returned an error.
    #[error("API error {status} ({error_type}): {message}")]
    Api {
        status: u16,
        error_type: String,
        message: String,
    },

    /// Rate limited by the API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The API key is not a valid header value.
    #[error("invalid API key: {0}")]
    InvalidKey(String),
}

/// Error body returned by the API.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_claude_error_display() {
        let err = ClaudeError::RateLimited(30);
        assert_eq!(err.to_string(), "rate limited, retry after 30 seconds");

        let err = ClaudeError::Api {
            status: 400,
            error_type: "invalid_request_error".to_string(),
            message: "image exceeds 5 MB maximum".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error 400 (invalid_request_error): image exceeds 5 MB maximum"
        );
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "type": "error",
            "error": { "type": "overloaded_error", "message": "Overloaded" }
        }"#;
        let response: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.error_type, "overloaded_error");
        assert_eq!(response.error.message, "Overloaded");
    }
}
