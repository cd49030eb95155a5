//! # Gateway Providers
//!
//! Everything the gateway needs to talk to one backend provider:
//! - The provider registry loaded at startup
//! - Payload translation per provider family
//! - The outbound HTTP client (buffered and streaming)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod registry;
pub mod translator;

// Re-export main types
pub use client::{ByteStream, HttpProviderClient, ProviderClient};
pub use registry::ProviderRegistry;
pub use translator::{translate, OutboundMessage, OutboundPayload, OutboundRequest, ANTHROPIC_MAX_TOKENS};
