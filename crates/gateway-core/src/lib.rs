//! # Gateway Core
//!
//! Core types and error handling for the relay gateway.
//!
//! This crate provides the foundational types used throughout the gateway:
//! - The unified chat request format and its content flattening rules
//! - The provider entity and its payload family
//! - Error types and handling

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod provider;
pub mod request;

// Re-export commonly used types
pub use error::{AttemptFailure, GatewayError, GatewayResult};
pub use provider::{Provider, ProviderFamily};
pub use request::{ChatMessage, ChatRequest, ChatRequestBuilder, ContentPart, MessageContent};
