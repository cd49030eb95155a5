//! Error types for the gateway.
//!
//! Per-provider failures (`Transport`, `Provider`) are recovered by the
//! failover sweep and never reach the caller on their own. Only
//! `ModelNotFound`, `AllProvidersFailed` and request-level errors cross the
//! core boundary.

use std::fmt;

/// Result alias used across the gateway crates
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// No configured provider lists the requested model
    #[error("No matching model found: {model}")]
    ModelNotFound {
        /// Requested model name
        model: String,
    },

    /// Every matching provider was attempted and failed
    #[error("All providers failed for model '{model}' ({} attempts)", failures.len())]
    AllProvidersFailed {
        /// Requested model name
        model: String,
        /// One entry per attempted provider, in traversal order
        failures: Vec<AttemptFailure>,
    },

    /// Network or connection failure talking to a provider
    #[error("Transport error from provider '{provider}': {message}")]
    Transport {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Provider answered with an error status or an unusable body
    #[error("Provider '{provider}' error{}: {message}", status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
        /// HTTP status returned by the provider, when one was received
        status: Option<u16>,
    },

    /// Invalid inbound request
    #[error("Validation error: {message}")]
    Validation {
        /// Error message
        message: String,
    },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal {
        /// Error message
        message: String,
    },
}

impl GatewayError {
    /// Create a model-not-found error
    pub fn model_not_found(model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            model: model.into(),
        }
    }

    /// Create a transport error
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a provider error
    pub fn provider(
        provider: impl Into<String>,
        message: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            status,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code this error maps to at the gateway boundary
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ModelNotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Transport { .. } | Self::Provider { .. } => 502,
            Self::AllProvidersFailed { .. } | Self::Internal { .. } => 500,
        }
    }

    /// Stable error type string for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ModelNotFound { .. } => "model_not_found",
            Self::AllProvidersFailed { .. } => "all_providers_failed",
            Self::Transport { .. } => "transport_error",
            Self::Provider { .. } => "provider_error",
            Self::Validation { .. } => "invalid_request_error",
            Self::Internal { .. } => "internal_error",
        }
    }
}

/// A failed attempt recorded during a failover sweep
#[derive(Debug, Clone)]
pub struct AttemptFailure {
    /// Provider name
    pub provider: String,
    /// Index of the provider within the matching set
    pub index: usize,
    /// The error the attempt produced
    pub error: GatewayError,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.index, self.provider, self.error)
    }
}
