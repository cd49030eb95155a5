//! Traversal order tests over real HTTP upstreams.

use crate::fixtures::*;
use crate::helpers::*;
use crate::mock_providers::*;
use gateway_core::Provider;
use gateway_routing::TraversalMode;

async fn healthy(id: &str) -> MockUpstream {
    let upstream = MockUpstream::start().await;
    upstream.respond_json(completion_response(id, "ok")).await;
    upstream
}

async fn served_by(server: &TestServer) -> String {
    let response = server.chat(&chat_body("gpt-x")).await;
    assert_status(&response, 200);
    TestServer::json_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_sequential_always_starts_at_first() {
    let u0 = healthy("u0").await;
    let u1 = healthy("u1").await;

    let server = TestServer::with_providers(
        vec![
            Provider::new("openai", u0.url(), "K", ["gpt-x"]),
            Provider::new("openai", u1.url(), "K", ["gpt-x"]),
        ],
        TraversalMode::Sequential,
    )
    .await;

    for _ in 0..3 {
        assert_eq!(served_by(&server).await, "u0");
    }
    assert_eq!(u1.calls().await, 0);
}

#[tokio::test]
async fn test_round_robin_starts_at_cursor() {
    let u0 = healthy("u0").await;
    let u1 = healthy("u1").await;
    let u2 = healthy("u2").await;

    let server = TestServer::with_providers(
        vec![
            Provider::new("openai", u0.url(), "K", ["gpt-x"]),
            Provider::new("openai", u1.url(), "K", ["gpt-x"]),
            Provider::new("openai", u2.url(), "K", ["gpt-x"]),
        ],
        TraversalMode::RoundRobin,
    )
    .await;

    // Fresh cursor sits before index 0, so the first sweep starts at the last provider
    assert_eq!(served_by(&server).await, "u2");
    // A success leaves the cursor on the winner
    assert_eq!(served_by(&server).await, "u2");
    assert_eq!(u0.calls().await, 0);
    assert_eq!(u1.calls().await, 0);
}

#[tokio::test]
async fn test_round_robin_moves_past_failures() {
    let u0 = healthy("u0").await;
    let u1 = MockUpstream::start().await;
    u1.respond_status(502).await;

    let server = TestServer::with_providers(
        vec![
            Provider::new("openai", u0.url(), "K", ["gpt-x"]),
            Provider::new("openai", u1.url(), "K", ["gpt-x"]),
        ],
        TraversalMode::RoundRobin,
    )
    .await;

    // Starts at u1 (index n-1), fails, wraps to u0
    assert_eq!(served_by(&server).await, "u0");
    assert_eq!(u1.calls().await, 1);

    // Cursor now on u0, which keeps winning
    assert_eq!(served_by(&server).await, "u0");
    assert_eq!(u1.calls().await, 1);
}

#[tokio::test]
async fn test_only_matching_providers_are_tried() {
    let other = healthy("other").await;
    let target = healthy("target").await;

    let server = TestServer::with_providers(
        vec![
            Provider::new("openai", other.url(), "K", ["gpt-y"]),
            Provider::new("openai", target.url(), "K", ["gpt-x"]),
        ],
        TraversalMode::Sequential,
    )
    .await;

    assert_eq!(served_by(&server).await, "target");
    assert_eq!(other.calls().await, 0);
}
