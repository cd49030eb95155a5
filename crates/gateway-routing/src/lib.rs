//! # Gateway Routing
//!
//! Provider selection and failover for the relay gateway.
//!
//! This crate provides:
//! - Model-to-provider matching against the registry
//! - Sequential and round-robin traversal orders
//! - A single linear failover sweep per request

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cursor;
pub mod failover;

// Re-export main types
pub use cursor::FailoverCursor;
pub use failover::{CompletionBody, CompletionOutcome, FailoverCoordinator, TraversalMode};
