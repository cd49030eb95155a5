//! HTTP request handlers for the gateway API.

use axum::{
    body::Body,
    extract::{Extension, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::TryStreamExt;
use gateway_core::ChatRequest;
use gateway_routing::CompletionBody;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    auth::ApiKeyMetadata,
    error::ApiError,
    extractors::{JsonBody, RequestId},
    state::AppState,
};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Version
    pub version: String,
    /// Configured providers
    pub providers: usize,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: state.registry().len(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// One entry of the model list
#[derive(Debug, Serialize)]
pub struct ModelObject {
    /// Model name
    pub id: String,
    /// Always `model`
    pub object: &'static str,
    /// First provider listing the model
    pub owned_by: String,
}

/// OpenAI-compatible model list
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Always `list`
    pub object: &'static str,
    /// Models in registry order
    pub data: Vec<ModelObject>,
}

/// List models endpoint
#[instrument(skip(state))]
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let data = state
        .registry()
        .model_ids()
        .into_iter()
        .map(|(id, owned_by)| ModelObject {
            id,
            object: "model",
            owned_by,
        })
        .collect();

    Json(ModelsResponse {
        object: "list",
        data,
    })
}

/// Chat completion endpoint
///
/// Runs one failover sweep. A buffered winner is returned as JSON; a
/// streaming winner is relayed chunk by chunk as `text/event-stream`.
#[instrument(
    skip_all,
    fields(model = %request.model, request_id = %request_id, owner = %key.owner)
)]
pub async fn chat_completion(
    State(state): State<AppState>,
    Extension(key): Extension<ApiKeyMetadata>,
    RequestId(request_id): RequestId,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Result<Response, ApiError> {
    debug!(
        messages = request.messages.len(),
        streaming = request.is_streaming(),
        "Processing chat completion request"
    );

    let outcome = state.coordinator().handle(&request).await?;

    info!(
        provider = %outcome.provider.name(),
        index = outcome.index,
        attempts = outcome.attempts,
        "Chat completion served"
    );

    match outcome.body {
        CompletionBody::Json(value) => Ok(Json(value).into_response()),
        CompletionBody::Stream(stream) => {
            let provider = outcome.provider.name().to_string();
            let stream = stream.inspect_err(move |e| {
                warn!(provider = %provider, error = %e, "Upstream stream failed mid-relay");
            });

            let mut response = Response::new(Body::from_stream(stream));
            *response.status_mut() = StatusCode::OK;
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/event-stream"),
            );
            response
                .headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            Ok(response)
        }
    }
}
