//! Mock upstream providers for integration testing
//!
//! Wiremock servers that answer on the chat-completions path.

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Path every mock upstream serves
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Mock upstream provider
pub struct MockUpstream {
    /// Underlying wiremock server
    pub server: MockServer,
}

impl MockUpstream {
    /// Start an upstream with no mounted responses
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Full chat-completions URL, used verbatim as the provider's base_url
    pub fn url(&self) -> String {
        format!("{}{COMPLETIONS_PATH}", self.server.uri())
    }

    /// Answer every completion with `body`
    pub async fn respond_json(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer every completion with an SSE body
    pub async fn respond_stream(&self, body: String) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
            .mount(&self.server)
            .await;
    }

    /// Answer every completion with an error status
    pub async fn respond_status(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(serde_json::json!({"error": {"message": "upstream unavailable"}})),
            )
            .mount(&self.server)
            .await;
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Number of requests received so far
    pub async fn calls(&self) -> usize {
        self.requests().await.len()
    }

    /// JSON body of the most recent request
    pub async fn last_body(&self) -> Option<Value> {
        self.requests()
            .await
            .last()
            .and_then(|r| serde_json::from_slice(&r.body).ok())
    }
}

/// URL on which nothing listens
pub fn refused_url() -> String {
    format!("http://127.0.0.1:1{COMPLETIONS_PATH}")
}
