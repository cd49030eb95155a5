//! Provider registry file.
//!
//! The file is a YAML list of entries:
//!
//! ```yaml
//! - provider: openai
//!   base_url: https://api.openai.com/v1/chat/completions
//!   api: sk-...
//!   model:
//!     - gpt-4o
//!     - gpt-4o-mini
//! ```

use gateway_core::Provider;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::error::ConfigError;

/// One entry of the providers file
#[derive(Debug, Deserialize)]
pub struct ProviderEntry {
    /// Provider name; `anthropic` selects the anthropic payload family
    pub provider: String,
    /// Full chat-completions endpoint URL
    pub base_url: String,
    /// Upstream credential
    pub api: SecretString,
    /// Supported model names
    #[serde(default)]
    pub model: Vec<String>,
}

impl ProviderEntry {
    fn into_provider(self, index: usize) -> Result<Provider, ConfigError> {
        if self.provider.trim().is_empty() {
            return Err(ConfigError::InvalidProvider {
                index,
                message: "provider name is empty".to_string(),
            });
        }

        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidProvider {
                index,
                message: format!("provider '{}' has no base_url", self.provider),
            });
        }

        if self.model.is_empty() {
            warn!(provider = %self.provider, index, "Provider lists no models and will never be selected");
        }

        Ok(Provider::new(
            self.provider,
            self.base_url,
            self.api.expose_secret().clone(),
            self.model,
        ))
    }
}

/// Parse providers from YAML text, keeping file order
///
/// An empty document yields no providers.
pub fn parse_providers(yaml: &str, path: &Path) -> Result<Vec<Provider>, ConfigError> {
    let entries: Option<Vec<ProviderEntry>> =
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    entries
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry.into_provider(index))
        .collect()
}

/// Load providers from a file
///
/// A missing file is not an error: the gateway starts with no providers and
/// answers every request with "not found".
pub async fn load_providers(path: &Path) -> Result<Vec<Provider>, ConfigError> {
    let yaml = match tokio::fs::read_to_string(path).await {
        Ok(yaml) => yaml,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Providers file not found, starting with no providers");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let providers = parse_providers(&yaml, path)?;
    info!(path = %path.display(), providers = providers.len(), "Providers loaded");
    Ok(providers)
}
