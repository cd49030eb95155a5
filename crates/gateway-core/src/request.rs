//! Request types for the gateway.
//!
//! This module defines the unified request format accepted on the inbound side
//! and the content flattening rule applied before a request leaves the gateway.

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};

/// Unified chat-completion request
///
/// `stream` and `include_usage` default to `Some(false)` when the field is
/// omitted. An explicit JSON `null` leaves them `None`, which drops the field
/// from the outbound payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Target model (e.g., "gpt-4o", "claude-3-5-sonnet")
    pub model: String,

    /// Chat messages for the conversation
    pub messages: Vec<ChatMessage>,

    /// Whether to return log probabilities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<bool>,

    /// Number of most likely tokens to return per position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<i64>,

    /// Enable streaming response
    #[serde(default = "default_flag", skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,

    /// Ask the provider to include token usage
    #[serde(default = "default_flag", skip_serializing_if = "Option::is_none")]
    pub include_usage: Option<bool>,
}

fn default_flag() -> Option<bool> {
    Some(false)
}

impl ChatRequest {
    /// Create a new builder for `ChatRequest`
    #[must_use]
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }

    /// Whether the caller asked for a streamed response
    pub fn is_streaming(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}

/// Builder for `ChatRequest`
#[derive(Debug, Default)]
pub struct ChatRequestBuilder {
    model: Option<String>,
    messages: Vec<ChatMessage>,
    logprobs: Option<bool>,
    top_logprobs: Option<i64>,
    stream: Option<bool>,
    include_usage: Option<bool>,
}

impl ChatRequestBuilder {
    /// Set the model
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the messages
    #[must_use]
    pub fn messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Add a message
    #[must_use]
    pub fn message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Set logprobs
    #[must_use]
    pub fn logprobs(mut self, logprobs: bool) -> Self {
        self.logprobs = Some(logprobs);
        self
    }

    /// Set top_logprobs
    #[must_use]
    pub fn top_logprobs(mut self, top_logprobs: i64) -> Self {
        self.top_logprobs = Some(top_logprobs);
        self
    }

    /// Enable or disable streaming
    #[must_use]
    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Set include_usage
    #[must_use]
    pub fn include_usage(mut self, include_usage: bool) -> Self {
        self.include_usage = Some(include_usage);
        self
    }

    /// Build the request
    ///
    /// Unset `stream` and `include_usage` take the same `false` default as a
    /// deserialized request.
    ///
    /// # Errors
    /// Returns error if required fields are missing
    pub fn build(self) -> Result<ChatRequest, GatewayError> {
        let model = self
            .model
            .ok_or_else(|| GatewayError::validation("model is required"))?;

        Ok(ChatRequest {
            model,
            messages: self.messages,
            logprobs: self.logprobs,
            top_logprobs: self.top_logprobs,
            stream: self.stream.or_else(default_flag),
            include_usage: self.include_usage.or_else(default_flag),
        })
    }
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role ("system", "user", "assistant", ...)
    pub role: String,
    /// Message content
    pub content: MessageContent,
}

impl ChatMessage {
    /// Create a message with plain text content
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: MessageContent::Text(content.into()),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Create a message made of content parts
    #[must_use]
    pub fn with_parts(role: impl Into<String>, parts: Vec<ContentPart>) -> Self {
        Self {
            role: role.into(),
            content: MessageContent::Parts(parts),
        }
    }
}

/// Message content: either plain text or a list of typed parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Multi-part content
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Flatten to a single string
    ///
    /// Text content is returned as is. For parts, only `text` parts are kept,
    /// joined by a single space in order.
    pub fn flatten(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .filter(|part| part.is_text())
                .map(|part| part.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A typed content part
///
/// Parts other than `text` (e.g. `image_url`) are accepted and carried, but
/// dropped when content is flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPart {
    /// Part type ("text", "image_url", ...)
    #[serde(rename = "type")]
    pub part_type: String,
    /// Text payload; empty for parts that carry none
    #[serde(default)]
    pub text: String,
}

impl ContentPart {
    /// Create a text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            part_type: "text".to_string(),
            text: text.into(),
        }
    }

    /// Create a part of an arbitrary type
    #[must_use]
    pub fn new(part_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            part_type: part_type.into(),
            text: text.into(),
        }
    }

    /// Whether this part contributes to flattened content
    pub fn is_text(&self) -> bool {
        self.part_type == "text"
    }
}
