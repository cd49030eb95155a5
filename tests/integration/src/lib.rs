//! Integration tests for the relay gateway
//!
//! Each test runs a real gateway on a loopback port in front of wiremock
//! upstreams and talks to it over HTTP:
//! - API surface (health, models, auth)
//! - Failover across providers
//! - Round-robin traversal
//! - Streaming relay
//! - Registry file loading

pub mod helpers;
pub mod mock_providers;

// Re-export commonly used items
pub use fixtures::*;
pub use helpers::*;
pub use mock_providers::*;

#[cfg(test)]
mod api_tests;
#[cfg(test)]
mod routing_tests;
