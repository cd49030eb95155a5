//! Failover coordination.
//!
//! A request is matched against the registry, the matching providers are put
//! in traversal order, and each is tried once until one succeeds. Attempts are
//! strictly sequential; there is no backoff and no retry of a provider within
//! a sweep.

use gateway_core::{AttemptFailure, ChatRequest, GatewayError, GatewayResult, Provider};
use gateway_providers::{translate, ByteStream, ProviderClient, ProviderRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::cursor::FailoverCursor;

/// Order in which matching providers are attempted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// Always `0..n`
    #[default]
    Sequential,
    /// Continue from the cursor left by the previous sweep
    RoundRobin,
}

impl TraversalMode {
    /// Mode for a round-robin on/off toggle
    pub fn from_round_robin(enabled: bool) -> Self {
        if enabled {
            Self::RoundRobin
        } else {
            Self::Sequential
        }
    }

    /// Provider index visited at `step` of a sweep over `n` providers
    ///
    /// `offset` is the cursor value when the sweep started. Round-robin uses
    /// a Euclidean modulo, so the unset cursor (`-1`) starts at `n - 1`.
    pub fn index_at(self, offset: isize, step: usize, n: usize) -> usize {
        match self {
            Self::Sequential => step,
            Self::RoundRobin => (offset + step as isize).rem_euclid(n as isize) as usize,
        }
    }
}

impl fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::RoundRobin => write!(f, "round_robin"),
        }
    }
}

/// Body produced by the winning provider
pub enum CompletionBody {
    /// Buffered JSON response
    Json(Value),
    /// Raw streamed response
    Stream(ByteStream),
}

impl fmt::Debug for CompletionBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Successful result of a failover sweep
#[derive(Debug)]
pub struct CompletionOutcome {
    /// Provider that answered
    pub provider: Arc<Provider>,
    /// Its index within the matching set
    pub index: usize,
    /// Attempts made, including the successful one
    pub attempts: usize,
    /// Response body
    pub body: CompletionBody,
}

/// Drives provider attempts for each request
pub struct FailoverCoordinator {
    registry: Arc<ProviderRegistry>,
    client: Arc<dyn ProviderClient>,
    mode: TraversalMode,
    cursor: FailoverCursor,
}

impl FailoverCoordinator {
    /// Create a coordinator over a registry and client
    pub fn new(
        registry: Arc<ProviderRegistry>,
        client: Arc<dyn ProviderClient>,
        mode: TraversalMode,
    ) -> Self {
        Self {
            registry,
            client,
            mode,
            cursor: FailoverCursor::new(),
        }
    }

    /// Traversal mode
    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    /// Shared round-robin cursor
    pub fn cursor(&self) -> &FailoverCursor {
        &self.cursor
    }

    /// Provider registry
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Run one failover sweep for `request`
    ///
    /// # Errors
    /// `ModelNotFound` when no provider lists the model; `AllProvidersFailed`
    /// when every matching provider failed. Per-provider errors are recorded
    /// on the latter and never returned on their own.
    pub async fn handle(&self, request: &ChatRequest) -> GatewayResult<CompletionOutcome> {
        let matching = self.registry.matching(&request.model);

        if matching.is_empty() {
            warn!(model = %request.model, "No provider serves requested model");
            return Err(GatewayError::model_not_found(&request.model));
        }

        let total = matching.len();
        let offset = self.cursor.position();
        let mut failures = Vec::with_capacity(total);

        for step in 0..total {
            let index = self.mode.index_at(offset, step, total);
            self.cursor.set(index);
            let provider = &matching[index];

            info!(
                provider = %provider.name(),
                index,
                attempt = step + 1,
                total,
                mode = %self.mode,
                "Attempting provider"
            );

            match self.attempt(request, provider).await {
                Ok(body) => {
                    info!(
                        provider = %provider.name(),
                        index,
                        attempts = step + 1,
                        "Provider attempt succeeded"
                    );

                    return Ok(CompletionOutcome {
                        provider: Arc::clone(provider),
                        index,
                        attempts: step + 1,
                        body,
                    });
                }
                Err(error) => {
                    warn!(
                        provider = %provider.name(),
                        index,
                        error = %error,
                        "Provider attempt failed"
                    );

                    failures.push(AttemptFailure {
                        provider: provider.name().to_string(),
                        index,
                        error,
                    });
                }
            }
        }

        error!(
            model = %request.model,
            attempts = failures.len(),
            "All providers failed"
        );

        Err(GatewayError::AllProvidersFailed {
            model: request.model.clone(),
            failures,
        })
    }

    async fn attempt(&self, request: &ChatRequest, provider: &Provider) -> GatewayResult<CompletionBody> {
        let outbound = translate(request, provider)?;

        if request.is_streaming() {
            self.client
                .post_stream(provider, &outbound)
                .await
                .map(CompletionBody::Stream)
        } else {
            self.client.post(provider, &outbound).await.map(CompletionBody::Json)
        }
    }
}

impl fmt::Debug for FailoverCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailoverCoordinator")
            .field("providers", &self.registry.len())
            .field("mode", &self.mode)
            .field("cursor", &self.cursor.position())
            .finish()
    }
}
