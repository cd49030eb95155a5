//! # Gateway Server
//!
//! HTTP surface of the relay gateway.
//!
//! - `POST /v1/chat/completions` runs a failover sweep and relays the winning
//!   provider's body, buffered or streamed
//! - `GET /v1/models` lists every configured model
//! - `GET /health`, `GET /healthz`
//!
//! `/v1/*` is guarded by bearer API keys when any are configured.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod state;

pub use auth::{auth_middleware, ApiKeyMetadata, ApiKeyStore};
pub use error::ApiError;
pub use routes::create_router;
pub use server::{Server, ServerConfig};
pub use shutdown::shutdown_signal;
pub use state::{AppState, AppStateBuilder};
