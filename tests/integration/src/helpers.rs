//! Test helper utilities for integration tests

use gateway_core::Provider;
use gateway_providers::{HttpProviderClient, ProviderRegistry};
use gateway_routing::TraversalMode;
use gateway_server::{create_router, ApiKeyStore, AppState};
use reqwest::{Client, Response};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Client key accepted by servers built with [`TestServer::with_providers`]
pub const TEST_API_KEY: &str = "sk-integration";

/// Initialize tracing for tests when `TEST_LOG` is set
pub fn init_tracing() {
    TRACING.call_once(|| {
        if std::env::var("TEST_LOG").is_ok() {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        }
    });
}

/// Running gateway on a loopback port
pub struct TestServer {
    /// The server address
    pub addr: SocketAddr,
    /// HTTP client for making requests
    pub client: Client,
    /// Base URL for the server
    pub base_url: String,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Serve `state` on an ephemeral port
    pub async fn start(state: AppState) -> Self {
        init_tracing();

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let router = create_router(state);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server error");
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create client");

        Self {
            addr,
            client,
            base_url: format!("http://{addr}"),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Gateway over `providers` accepting [`TEST_API_KEY`]
    pub async fn with_providers(providers: Vec<Provider>, mode: TraversalMode) -> Self {
        let keys = ApiKeyStore::from_keys([TEST_API_KEY]);
        Self::start(gateway_state(providers, mode, keys)).await
    }

    /// Get the full URL for a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request carrying [`TEST_API_KEY`]
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .bearer_auth(TEST_API_KEY)
            .send()
            .await
            .expect("Request failed")
    }

    /// Make a POST request with JSON body carrying [`TEST_API_KEY`]
    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.post_json_with_token(path, body, TEST_API_KEY).await
    }

    /// Make a POST request with JSON body and no `Authorization` header
    pub async fn post_json_anonymous(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Make a POST request with JSON body and a bearer token
    pub async fn post_json_with_token(&self, path: &str, body: &Value, token: &str) -> Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Send a chat completion
    pub async fn chat(&self, body: &Value) -> Response {
        self.post_json("/v1/chat/completions", body).await
    }

    /// Make a streaming POST request and collect chunks
    pub async fn post_streaming(&self, path: &str, body: &Value) -> StreamedResponse {
        use futures::StreamExt;

        let response = self.post_json(path, body).await;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let mut chunks = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let bytes = chunk.expect("Stream error");
            chunks.push(String::from_utf8(bytes.to_vec()).expect("Non-UTF-8 chunk"));
        }

        StreamedResponse {
            status,
            content_type,
            chunks,
        }
    }

    /// Parse response body as JSON
    pub async fn json_body(response: Response) -> Value {
        response.json().await.expect("Failed to parse JSON")
    }

    /// Shutdown the test server
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Application state over `providers` using the real HTTP client
pub fn gateway_state(providers: Vec<Provider>, mode: TraversalMode, keys: ApiKeyStore) -> AppState {
    let client = HttpProviderClient::new().expect("Failed to create provider client");

    AppState::builder(Arc::new(client))
        .registry(ProviderRegistry::from_providers(providers))
        .mode(mode)
        .api_keys(keys)
        .build()
}

/// Fully drained streaming response
#[derive(Debug)]
pub struct StreamedResponse {
    /// HTTP status
    pub status: u16,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Body chunks as received
    pub chunks: Vec<String>,
}

impl StreamedResponse {
    /// Chunks joined into the full body
    pub fn body(&self) -> String {
        self.chunks.concat()
    }
}

/// Assert that a response has the expected status code
pub fn assert_status(response: &Response, expected: u16) {
    assert_eq!(
        response.status().as_u16(),
        expected,
        "Expected status {}, got {}",
        expected,
        response.status()
    );
}
