//! # Relay Gateway
//!
//! OpenAI-compatible chat-completion gateway that fans a request out over every
//! provider serving the requested model, in order, until one answers.
//!
//! ## Usage
//!
//! ```bash
//! # Providers from ./api.yaml, listening on 0.0.0.0:8000
//! relay-gateway
//!
//! # Round-robin traversal, custom registry, client keys
//! USE_ROUND_ROBIN=true GATEWAY_PROVIDERS_FILE=/etc/relay/api.yaml \
//!   GATEWAY_API_KEYS=sk-one,sk-two relay-gateway
//! ```

use anyhow::Context;
use gateway_config::{load_config, load_providers};
use gateway_providers::{HttpProviderClient, ProviderRegistry};
use gateway_routing::TraversalMode;
use gateway_server::{ApiKeyStore, AppState, Server, ServerConfig};
use gateway_telemetry::{init_logging, LoggingConfig};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Application entry point
#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let logging = LoggingConfig::new()
        .with_level(&config.logging.level)
        .with_json(config.logging.json);
    if let Err(e) = init_logging(&logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting relay gateway"
    );

    if let Err(e) = run(config).await {
        error!(error = %format!("{e:#}"), "Gateway failed");
        std::process::exit(1);
    }
}

/// Main application logic
async fn run(config: gateway_config::GatewayConfig) -> anyhow::Result<()> {
    info!(
        host = %config.server.host,
        port = config.server.port,
        providers_file = %config.providers_file.display(),
        "Configuration loaded"
    );

    let providers = load_providers(&config.providers_file)
        .await
        .context("loading provider registry")?;
    let registry = ProviderRegistry::from_providers(providers);

    info!(
        providers = registry.len(),
        models = registry.model_ids().len(),
        "Provider registry initialized"
    );

    let api_keys = ApiKeyStore::from_keys(config.api_keys.iter().cloned());
    if api_keys.is_empty() {
        warn!("GATEWAY_API_KEYS not set, every /v1 request will be rejected");
    }

    let client = HttpProviderClient::new().context("creating upstream HTTP client")?;

    let state = AppState::builder(Arc::new(client))
        .registry(registry)
        .mode(TraversalMode::from_round_robin(config.round_robin))
        .api_keys(api_keys)
        .build();

    let server_config = ServerConfig::new()
        .with_host(&config.server.host)
        .with_port(config.server.port);

    Server::new(server_config, state)
        .run()
        .await
        .context("serving HTTP")?;

    Ok(())
}
