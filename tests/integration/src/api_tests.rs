//! API surface tests: health, model listing and client authentication.

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::*;
use gateway_core::Provider;
use gateway_routing::TraversalMode;
use gateway_server::ApiKeyStore;

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::with_providers(Vec::new(), TraversalMode::Sequential).await;

    for path in ["/health", "/healthz"] {
        let response = server.get(path).await;
        assert_status(&response, 200);

        let body = TestServer::json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["providers"], 0);
    }
}

#[tokio::test]
async fn test_models_endpoint() {
    let providers = vec![
        Provider::new("openai", "http://u1", "K1", ["gpt-x", "gpt-y"]),
        Provider::new("anthropic", "http://u2", "K2", ["gpt-x", "claude-z"]),
    ];
    let server = TestServer::with_providers(providers, TraversalMode::Sequential).await;

    let response = server.get("/v1/models").await;
    assert_status(&response, 200);

    let body = TestServer::json_body(response).await;
    assert_eq!(body["object"], "list");

    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["gpt-x", "gpt-y", "claude-z"]);
    assert_eq!(body["data"][2]["owned_by"], "anthropic");
}

#[tokio::test]
async fn test_empty_registry_answers_404() {
    let server = TestServer::with_providers(Vec::new(), TraversalMode::Sequential).await;

    let response = server.chat(&chat_body("gpt-x")).await;
    assert_status(&response, 404);

    let body = TestServer::json_body(response).await;
    assert_eq!(body["error"]["type"], "model_not_found");
}

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let upstream = MockUpstream::start().await;
    upstream.respond_json(completion_response("r1", "hi")).await;

    let state = gateway_state(
        vec![Provider::new("openai", upstream.url(), "K1", ["gpt-x"])],
        TraversalMode::Sequential,
        ApiKeyStore::from_keys(["sk-valid"]),
    );
    let server = TestServer::start(state).await;

    let response = server
        .post_json_anonymous("/v1/chat/completions", &chat_body("gpt-x"))
        .await;
    assert_status(&response, 403);
    let body = TestServer::json_body(response).await;
    assert_eq!(body["error"]["type"], "invalid_api_key");

    let response = server
        .post_json_with_token("/v1/chat/completions", &chat_body("gpt-x"), "sk-wrong")
        .await;
    assert_status(&response, 403);
    assert_eq!(upstream.calls().await, 0);

    let response = server
        .post_json_with_token("/v1/chat/completions", &chat_body("gpt-x"), "sk-valid")
        .await;
    assert_status(&response, 200);
    assert_eq!(upstream.calls().await, 1);
}

#[tokio::test]
async fn test_health_is_public_when_keys_configured() {
    let state = gateway_state(
        Vec::new(),
        TraversalMode::Sequential,
        ApiKeyStore::from_keys(["sk-valid"]),
    );
    let server = TestServer::start(state).await;

    assert_status(&server.get("/health").await, 200);
    assert_status(&server.get("/v1/models").await, 403);
}

#[tokio::test]
async fn test_no_configured_keys_rejects_everything() {
    let upstream = MockUpstream::start().await;
    upstream.respond_json(completion_response("r1", "hi")).await;

    let state = gateway_state(
        vec![Provider::new("openai", upstream.url(), "K1", ["gpt-x"])],
        TraversalMode::Sequential,
        ApiKeyStore::new(),
    );
    let server = TestServer::start(state).await;

    let response = server
        .post_json_anonymous("/v1/chat/completions", &chat_body("gpt-x"))
        .await;
    assert_status(&response, 403);

    assert_status(&server.chat(&chat_body("gpt-x")).await, 403);
    assert_eq!(upstream.calls().await, 0);
    assert_status(&server.get("/health").await, 200);
}
