//! Types for the Claude Messages API.
//!
//! Only what a single-turn vision request needs: text and base64 image
//! blocks going out, text blocks coming back.

use serde::{Deserialize, Serialize};

/// A message in a conversation with Claude.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// "user" or "assistant".
    pub role: &'static str,
    pub content: Vec<ContentBlock>,
}

impl Message {
    #[must_use]
    pub const fn user(content: Vec<ContentBlock>) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

/// A request content block.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Image { source: ImageSource },
}

impl ContentBlock {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// An inline image from base64 data.
    #[must_use]
    pub fn base64_image(media_type: &'static str, data: impl Into<String>) -> Self {
        Self::Image {
            source: ImageSource {
                source_type: "base64",
                media_type,
                data: data.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub source_type: &'static str,
    /// e.g. `image/jpeg`.
    pub media_type: &'static str,
    pub data: String,
}

/// Request body for the Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
}

/// A response content block. Blocks other than text are kept but ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    ToolUse,
    #[serde(other)]
    Other,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Response from the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
    #[serde(default)]
    pub usage: Usage,
}

impl ChatResponse {
    /// Text of the first content block, or empty when it is not text.
    #[must_use]
    pub fn first_text(&self) -> &str {
        match self.content.first() {
            Some(ResponseBlock::Text { text }) => text,
            _ => "",
        }
    }
}
