//! # Gateway Telemetry
//!
//! Structured logging for the relay gateway.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;

pub use logging::{init_logging, LoggingConfig, LoggingError};
