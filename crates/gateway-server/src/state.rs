//! Shared application state.

use gateway_providers::{ProviderClient, ProviderRegistry};
use gateway_routing::{FailoverCoordinator, TraversalMode};
use std::sync::Arc;
use std::time::Instant;

use crate::auth::ApiKeyStore;

/// State shared by every handler
///
/// Cheap to clone; everything lives behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    coordinator: Arc<FailoverCoordinator>,
    api_keys: Arc<ApiKeyStore>,
    started_at: Instant,
}

impl AppState {
    /// Start building state around the process-wide upstream client
    pub fn builder(client: Arc<dyn ProviderClient>) -> AppStateBuilder {
        AppStateBuilder {
            registry: None,
            client,
            mode: TraversalMode::default(),
            api_keys: ApiKeyStore::default(),
        }
    }

    /// Failover coordinator
    pub fn coordinator(&self) -> &FailoverCoordinator {
        &self.coordinator
    }

    /// Provider registry
    pub fn registry(&self) -> &ProviderRegistry {
        self.coordinator.registry()
    }

    /// Accepted client keys
    pub fn api_keys(&self) -> &ApiKeyStore {
        &self.api_keys
    }

    /// Seconds since the state was built
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("coordinator", &self.coordinator)
            .field("api_keys", &self.api_keys.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`AppState`]
pub struct AppStateBuilder {
    registry: Option<ProviderRegistry>,
    client: Arc<dyn ProviderClient>,
    mode: TraversalMode,
    api_keys: ApiKeyStore,
}

impl AppStateBuilder {
    /// Provider registry; empty when unset
    #[must_use]
    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Traversal mode
    #[must_use]
    pub fn mode(mut self, mode: TraversalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Accepted client keys; an empty store rejects every `/v1` request
    #[must_use]
    pub fn api_keys(mut self, api_keys: ApiKeyStore) -> Self {
        self.api_keys = api_keys;
        self
    }

    /// Build the state
    pub fn build(self) -> AppState {
        let registry = Arc::new(self.registry.unwrap_or_default());

        AppState {
            coordinator: Arc::new(FailoverCoordinator::new(registry, self.client, self.mode)),
            api_keys: Arc::new(self.api_keys),
            started_at: Instant::now(),
        }
    }
}
