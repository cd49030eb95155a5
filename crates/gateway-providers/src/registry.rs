//! Provider registry.
//!
//! Holds the configured providers in configuration order. Populated once at
//! startup and read-only afterwards; duplicate names are allowed (several
//! accounts at the same vendor are common).

use gateway_core::Provider;
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered, immutable set of configured providers
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<Provider>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from providers, keeping their order
    pub fn from_providers(providers: impl IntoIterator<Item = Provider>) -> Self {
        Self {
            providers: providers.into_iter().map(Arc::new).collect(),
        }
    }

    /// Providers whose model set contains `model`, in registry order
    pub fn matching(&self, model: &str) -> Vec<Arc<Provider>> {
        self.providers
            .iter()
            .filter(|provider| provider.supports(model))
            .cloned()
            .collect()
    }

    /// Every distinct model id with the first provider that lists it,
    /// in first-seen order
    pub fn model_ids(&self) -> Vec<(String, String)> {
        let mut seen = HashSet::new();
        let mut models = Vec::new();

        for provider in &self.providers {
            for model in provider.models() {
                if seen.insert(model.as_str()) {
                    models.push((model.clone(), provider.name().to_string()));
                }
            }
        }

        models
    }

    /// Number of providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
