//! Payload translation.
//!
//! Maps a unified [`ChatRequest`] onto the wire shape a provider expects. The
//! shape depends only on the provider's [`ProviderFamily`]:
//!
//! | field           | anthropic         | openai-compatible   |
//! |-----------------|-------------------|---------------------|
//! | `stream`        | if present        | if present          |
//! | `include_usage` | if present        | if present          |
//! | `max_tokens`    | always `1000`     | never               |
//! | `logprobs`      | never             | if present          |
//! | `top_logprobs`  | never             | if present          |
//!
//! Translation performs no I/O.

use gateway_core::{ChatMessage, ChatRequest, GatewayError, GatewayResult, Provider, ProviderFamily};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

/// Token limit sent to anthropic-family providers.
///
/// Not overridable per request.
pub const ANTHROPIC_MAX_TOKENS: u32 = 1000;

/// Everything needed to issue one provider attempt
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Target URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// JSON body
    pub payload: OutboundPayload,
}

/// Provider-facing request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundPayload {
    /// Model name, passed through unchanged
    pub model: String,
    /// Flattened messages
    pub messages: Vec<OutboundMessage>,
    /// Streaming flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Usage reporting flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_usage: Option<bool>,
    /// Token limit (anthropic family only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Log probabilities flag (openai-compatible family only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<bool>,
    /// Top log probabilities (openai-compatible family only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<i64>,
}

/// A message with its content flattened to a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// Message role
    pub role: String,
    /// Flattened content
    pub content: String,
}

impl From<&ChatMessage> for OutboundMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role.clone(),
            content: message.content.flatten(),
        }
    }
}

impl OutboundPayload {
    /// Build the payload for a request and provider family
    pub fn build(request: &ChatRequest, family: ProviderFamily) -> Self {
        let mut payload = Self {
            model: request.model.clone(),
            messages: request.messages.iter().map(OutboundMessage::from).collect(),
            stream: request.stream,
            include_usage: request.include_usage,
            max_tokens: None,
            logprobs: None,
            top_logprobs: None,
        };

        match family {
            ProviderFamily::Anthropic => {
                payload.max_tokens = Some(ANTHROPIC_MAX_TOKENS);
            }
            ProviderFamily::OpenAiCompatible => {
                payload.logprobs = request.logprobs;
                payload.top_logprobs = request.top_logprobs;
            }
        }

        payload
    }
}

/// Translate a request for one provider
///
/// # Errors
/// Returns a provider error if the credential cannot be sent as a header value
pub fn translate(request: &ChatRequest, provider: &Provider) -> GatewayResult<OutboundRequest> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", provider.credential())).map_err(|_| {
        GatewayError::provider(
            provider.name(),
            "credential is not a valid header value",
            None,
        )
    })?;
    auth.set_sensitive(true);

    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(OutboundRequest {
        url: provider.base_url().to_string(),
        headers,
        payload: OutboundPayload::build(request, provider.family()),
    })
}
