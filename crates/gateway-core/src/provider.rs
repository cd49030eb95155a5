//! Provider entity.
//!
//! A provider is one configured backend chat-completion service. Providers are
//! built once at startup and shared read-only behind `Arc`.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Payload family a provider belongs to
///
/// Providers in the same family accept the same outbound payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderFamily {
    /// Anthropic: requires `max_tokens`, rejects logprob fields
    Anthropic,
    /// Everything speaking the OpenAI chat-completions shape
    OpenAiCompatible,
}

impl ProviderFamily {
    /// Classify a provider by its configured name
    pub fn from_name(name: &str) -> Self {
        match name {
            "anthropic" => Self::Anthropic,
            _ => Self::OpenAiCompatible,
        }
    }
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anthropic => write!(f, "anthropic"),
            Self::OpenAiCompatible => write!(f, "openai-compatible"),
        }
    }
}

/// A configured backend provider
#[derive(Debug, Clone)]
pub struct Provider {
    name: String,
    base_url: String,
    credential: SecretString,
    models: BTreeSet<String>,
    family: ProviderFamily,
}

impl Provider {
    /// Create a provider; the family is derived from the name
    pub fn new<I, S>(
        name: impl Into<String>,
        base_url: impl Into<String>,
        credential: impl Into<String>,
        models: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let family = ProviderFamily::from_name(&name);
        Self {
            name,
            base_url: base_url.into(),
            credential: SecretString::new(credential.into()),
            models: models.into_iter().map(Into::into).collect(),
            family,
        }
    }

    /// Provider name as configured
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chat-completions endpoint URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upstream credential
    pub fn credential(&self) -> &str {
        self.credential.expose_secret()
    }

    /// Supported model names
    pub fn models(&self) -> &BTreeSet<String> {
        &self.models
    }

    /// Payload family
    pub fn family(&self) -> ProviderFamily {
        self.family
    }

    /// Whether this provider serves the given model
    pub fn supports(&self, model: &str) -> bool {
        self.models.contains(model)
    }
}
