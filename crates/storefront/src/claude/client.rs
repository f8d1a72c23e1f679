//! Messages API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{debug, instrument, warn};

use super::types::{ChatRequest, ChatResponse, Message};
use super::{ApiErrorResponse, ClaudeError};
use crate::config::AnthropicConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API client.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key contains invalid header characters
    /// or the HTTP client fails to build.
    pub fn new(config: &AnthropicConfig, timeout: Duration) -> Result<Self, ClaudeError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| ClaudeError::InvalidKey(e.to_string()))?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                api_url: config.api_url.clone(),
                model: config.model.clone(),
            }),
        })
    }

    /// Send one request and wait for the complete response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with an
    /// error status.
    #[instrument(skip(self, system, messages), fields(model = %self.inner.model))]
    pub async fn chat(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        max_tokens: u32,
    ) -> Result<ChatResponse, ClaudeError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens,
            system,
            messages,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.api_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status, response).await);
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ClaudeError::Parse(format!("Failed to parse response: {e}")))?;
        debug!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "Claude response received"
        );
        Ok(parsed)
    }
}

async fn error_for_status(status: StatusCode, response: reqwest::Response) -> ClaudeError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return ClaudeError::RateLimited(retry_after);
    }

    match response.text().await {
        Ok(body) => {
            warn!(status = status.as_u16(), body = %body, "Claude API error");
            match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => ClaudeError::Api {
                    status: status.as_u16(),
                    error_type: api_error.error.error_type,
                    message: api_error.error.message,
                },
                Err(_) => ClaudeError::Api {
                    status: status.as_u16(),
                    error_type: "unknown".to_string(),
                    message: body,
                },
            }
        }
        Err(e) => ClaudeError::Http(e),
    }
}
