//! Client API key authentication for `/v1/*`.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::{error::ApiError, state::AppState};

const REJECTION: &str = "Invalid or missing API Key";

/// Metadata attached to an accepted key
///
/// Inserted into request extensions after a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyMetadata {
    /// Who the key was issued to
    pub owner: String,
}

impl ApiKeyMetadata {
    /// Create metadata for `owner`
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }
}

/// Set of accepted bearer tokens
///
/// An empty store accepts no token.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyStore {
    keys: HashMap<String, ApiKeyMetadata>,
}

impl ApiKeyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from bare keys, naming owners `client-1`, `client-2`, ...
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for (i, key) in keys.into_iter().enumerate() {
            store.insert(key, ApiKeyMetadata::new(format!("client-{}", i + 1)));
        }
        store
    }

    /// Accept `key`
    pub fn insert(&mut self, key: impl Into<String>, metadata: ApiKeyMetadata) {
        self.keys.insert(key.into(), metadata);
    }

    /// Metadata for `key` if accepted
    pub fn validate(&self, key: &str) -> Option<&ApiKeyMetadata> {
        self.keys.get(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Token from an `Authorization: Bearer <token>` header value
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Reject requests without a known bearer token with 403
pub async fn auth_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let store = state.api_keys();
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    match token.and_then(|t| store.validate(t)) {
        Some(metadata) => {
            debug!(owner = %metadata.owner, "Request authenticated");
            let metadata = metadata.clone();
            request.extensions_mut().insert(metadata);
            next.run(request).await
        }
        None => {
            warn!(
                path = %request.uri().path(),
                has_token = token.is_some(),
                "Authentication failed"
            );
            ApiError::forbidden(REJECTION).into_response()
        }
    }
}
