//! Outbound provider client.
//!
//! One attempt is one HTTP exchange; the client never retries. Connection
//! failures map to [`GatewayError::Transport`], error statuses and unusable
//! bodies to [`GatewayError::Provider`].

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures_util::StreamExt;
use gateway_core::{GatewayError, GatewayResult, Provider};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, trace};

use crate::translator::OutboundRequest;

/// Raw byte chunks relayed from a streaming provider response.
///
/// Dropping the stream drops the upstream response and closes its connection.
pub type ByteStream = BoxStream<'static, GatewayResult<Bytes>>;

/// Performs calls against a single provider
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Issue a buffered request and parse the full body as JSON
    async fn post(&self, provider: &Provider, request: &OutboundRequest) -> GatewayResult<Value>;

    /// Open a streaming request and return its body as raw chunks
    ///
    /// The connection is established and the status checked before this
    /// returns; the body itself is read lazily.
    async fn post_stream(
        &self,
        provider: &Provider,
        request: &OutboundRequest,
    ) -> GatewayResult<ByteStream>;
}

/// `reqwest`-backed provider client
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpProviderClient {
    client: Client,
}

impl HttpProviderClient {
    /// Create a client with its own connection pool
    ///
    /// # Errors
    /// Returns error if HTTP client cannot be created
    pub fn new() -> GatewayResult<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(100)
            .build()
            .map_err(|e| GatewayError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    async fn send(&self, provider: &Provider, request: &OutboundRequest) -> GatewayResult<Response> {
        debug!(
            provider = %provider.name(),
            url = %request.url,
            stream = ?request.payload.stream,
            "Sending request to provider"
        );

        let response = self
            .client
            .post(&request.url)
            .headers(request.headers.clone())
            .json(&request.payload)
            .send()
            .await
            .map_err(|e| GatewayError::transport(provider.name(), format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::provider(
                provider.name(),
                format!("upstream returned {status}: {body}"),
                Some(status.as_u16()),
            ));
        }

        Ok(response)
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn post(&self, provider: &Provider, request: &OutboundRequest) -> GatewayResult<Value> {
        let response = self.send(provider, request).await?;
        let status = response.status().as_u16();

        response.json::<Value>().await.map_err(|e| {
            GatewayError::provider(
                provider.name(),
                format!("Failed to parse response: {e}"),
                Some(status),
            )
        })
    }

    async fn post_stream(
        &self,
        provider: &Provider,
        request: &OutboundRequest,
    ) -> GatewayResult<ByteStream> {
        let response = self.send(provider, request).await?;
        let provider_name = provider.name().to_string();

        trace!(provider = %provider_name, "Provider stream opened");

        let stream = response.bytes_stream().map(move |chunk| {
            chunk.map_err(|e| GatewayError::transport(&provider_name, format!("Stream error: {e}")))
        });

        Ok(Box::pin(stream))
    }
}
