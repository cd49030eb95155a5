//! # Gateway Config
//!
//! Process settings for the relay gateway.
//!
//! Settings come from environment variables. The provider registry lives in a
//! separate YAML file, see [`load_providers`].
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GATEWAY_HOST` | `0.0.0.0` |
//! | `GATEWAY_PORT` | `8000` |
//! | `GATEWAY_PROVIDERS_FILE` | `api.yaml` |
//! | `USE_ROUND_ROBIN` | `false` |
//! | `GATEWAY_API_KEYS` | empty |
//! | `GATEWAY_LOG_LEVEL` | `info` |
//! | `GATEWAY_LOG_FORMAT` | `pretty` |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod providers;

pub use error::ConfigError;
pub use providers::{load_providers, parse_providers, ProviderEntry};

use std::path::PathBuf;

/// Default listen host
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;
/// Default providers file
pub const DEFAULT_PROVIDERS_FILE: &str = "api.yaml";
/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Complete gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Listener settings
    pub server: ServerSettings,
    /// Path of the provider registry file
    pub providers_file: PathBuf,
    /// Round-robin traversal instead of sequential
    pub round_robin: bool,
    /// Client API keys accepted on `/v1/*`
    pub api_keys: Vec<String>,
    /// Logging settings
    pub logging: LogSettings,
}

/// Listener settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Default filter level
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            providers_file: PathBuf::from(DEFAULT_PROVIDERS_FILE),
            round_robin: false,
            api_keys: Vec::new(),
            logging: LogSettings::default(),
        }
    }
}

impl GatewayConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = non_empty(lookup("GATEWAY_HOST")) {
            config.server.host = host;
        }

        if let Some(port) = non_empty(lookup("GATEWAY_PORT")) {
            config.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "GATEWAY_PORT".to_string(),
                message: format!("'{port}' is not a valid port"),
            })?;
        }

        if let Some(file) = non_empty(lookup("GATEWAY_PROVIDERS_FILE")) {
            config.providers_file = PathBuf::from(file);
        }

        config.round_robin = lookup("USE_ROUND_ROBIN")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        if let Some(keys) = lookup("GATEWAY_API_KEYS") {
            config.api_keys = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(level) = non_empty(lookup("GATEWAY_LOG_LEVEL")) {
            config.logging.level = level;
        }

        if let Some(format) = non_empty(lookup("GATEWAY_LOG_FORMAT")) {
            config.logging.json = match format.trim().to_ascii_lowercase().as_str() {
                "json" => true,
                "pretty" | "text" => false,
                other => {
                    return Err(ConfigError::InvalidEnv {
                        key: "GATEWAY_LOG_FORMAT".to_string(),
                        message: format!("unknown format '{other}', expected json or pretty"),
                    })
                }
            };
        }

        Ok(config)
    }

    /// Socket address string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Load settings from the process environment
pub fn load_config() -> Result<GatewayConfig, ConfigError> {
    let config = GatewayConfig::from_env()?;
    tracing::debug!(
        bind = %config.bind_address(),
        providers_file = %config.providers_file.display(),
        round_robin = config.round_robin,
        api_keys = config.api_keys.len(),
        "Configuration loaded"
    );
    Ok(config)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
