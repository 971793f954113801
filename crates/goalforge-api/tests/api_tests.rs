//! Integration tests for the REST API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. Every test starts from the seeded demo dataset.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use goalforge_api::router::build_router;
use goalforge_api::state::AppState;
use goalforge_core::{ApiConfig, DomainStore, RewardConfig, StoreConfig, seed};
use serde_json::{Value, json};
use tower::ServiceExt;

fn make_state(latency_ms: u64) -> Arc<AppState> {
    let store = DomainStore::from_config(
        &StoreConfig {
            seed: Some(42),
            load_seed_data: true,
        },
        RewardConfig::default(),
    );
    Arc::new(AppState::new(
        store,
        &ApiConfig {
            simulated_latency_ms: latency_ms,
        },
    ))
}

fn make_router() -> Router {
    build_router(make_state(0))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(router: &Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn send_json(router: &Router, method: &str, path: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn put_empty(router: &Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::put(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =========================================================================
// Health and connect
// =========================================================================

#[tokio::test]
async fn test_health_returns_text() {
    let router = make_router();
    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes, "Backend is running!");
}

#[tokio::test]
async fn test_connect_existing_user() {
    let router = make_router();
    let (status, json) = send_json(
        &router,
        "POST",
        "/api/auth/connect",
        &json!({"wallet_address": "0xAlice123"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["_id"], seed::ALICE.to_string());
    assert_eq!(json["nfts"].as_array().unwrap().len(), 5);
    assert!(json["username"].is_null());
}

#[tokio::test]
async fn test_connect_new_user_then_again() {
    let router = make_router();
    let body = json!({"wallet_address": "0xDave000"});

    let (first_status, first) = send_json(&router, "POST", "/api/auth/connect", &body).await;
    assert_eq!(first_status, StatusCode::CREATED);
    assert!(first["nfts"].as_array().unwrap().is_empty());

    let (second_status, second) = send_json(&router, "POST", "/api/auth/connect", &body).await;
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(second["_id"], first["_id"]);
}

#[tokio::test]
async fn test_connect_without_wallet_is_bad_request() {
    let router = make_router();
    let (status, json) = send_json(&router, "POST", "/api/auth/connect", &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("wallet_address"));
}

// =========================================================================
// Goals
// =========================================================================

#[tokio::test]
async fn test_create_and_list_goals() {
    let router = make_router();
    let (status, goal) = send_json(
        &router,
        "POST",
        "/api/goals",
        &json!({
            "user_id": seed::BOB.to_string(),
            "title": "Run a marathon",
            "description": "42km",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["status"], "active");
    assert_eq!(goal["user_id"], seed::BOB.to_string());
    assert!(goal["completed_at"].is_null());

    let (status, goals) = get(&router, &format!("/api/goals/user/{}", seed::BOB)).await;
    assert_eq!(status, StatusCode::OK);
    let goals = goals.as_array().unwrap();
    assert_eq!(goals.len(), 4);
    assert_eq!(goals.last().unwrap()["_id"], goal["_id"]);
}

#[tokio::test]
async fn test_create_goal_errors() {
    let router = make_router();

    let (status, _) = send_json(
        &router,
        "POST",
        "/api/goals",
        &json!({"user_id": seed::ALICE.to_string(), "title": " ", "description": "x"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &router,
        "POST",
        "/api/goals",
        &json!({"user_id": "not-a-uuid", "title": "t", "description": "d"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send_json(
        &router,
        "POST",
        "/api/goals",
        &json!({
            "user_id": "00000000-0000-0000-0000-0000000000ff",
            "title": "t",
            "description": "d",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_complete_goal_mints_once() {
    let router = make_router();
    let path = format!("/api/goals/{}/complete", seed::GOAL_2);

    let (status, goal) = put_empty(&router, &path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goal["status"], "completed");
    assert!(!goal["completed_at"].is_null());

    let (_, again) = put_empty(&router, &path).await;
    assert_eq!(again, goal);

    let (_, tokens) = get(&router, &format!("/api/nfts/user/{}", seed::ALICE)).await;
    let tokens = tokens.as_array().unwrap();
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens.last().unwrap()["goal_id"], seed::GOAL_2.to_string());
    assert_eq!(tokens.last().unwrap()["listed"], false);
}

#[tokio::test]
async fn test_complete_unknown_goal_is_not_found() {
    let router = make_router();
    let (status, _) = put_empty(
        &router,
        "/api/goals/00000000-0000-0000-0000-0000000000ff/complete",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = put_empty(&router, "/api/goals/garbage/complete").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =========================================================================
// Tokens and marketplace
// =========================================================================

#[tokio::test]
async fn test_toggle_listing_by_owner() {
    let router = make_router();
    let path = format!("/api/nfts/{}/list", seed::TOKEN_2);
    let body = json!({"user_id": seed::ALICE.to_string()});

    let (status, json) = send_json(&router, "PUT", &path, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["listed"], true);
    assert_eq!(json["nft"]["_id"], seed::TOKEN_2.to_string());

    let (_, json) = send_json(&router, "PUT", &path, &body).await;
    assert_eq!(json["listed"], false);
}

#[tokio::test]
async fn test_toggle_listing_by_stranger_is_forbidden() {
    let router = make_router();
    let path = format!("/api/nfts/{}/list", seed::TOKEN_2);
    let (status, json) = send_json(
        &router,
        "PUT",
        &path,
        &json!({"user_id": seed::BOB.to_string()}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["status"], 403);
}

#[tokio::test]
async fn test_marketplace_hides_own_listings() {
    let router = make_router();
    let (status, json) = get(&router, &format!("/api/marketplace/{}", seed::BOB)).await;

    assert_eq!(status, StatusCode::OK);
    let listings = json.as_array().unwrap();
    assert_eq!(listings.len(), 3);
    for listing in listings {
        assert_eq!(listing["listed"], true);
        assert_ne!(listing["user_id"], seed::BOB.to_string());
        assert_eq!(listing["owner"]["_id"], listing["user_id"]);
        assert!(listing["owner"]["wallet_address"].is_string());
    }
}

#[tokio::test]
async fn test_trade_swaps_tokens() {
    let router = make_router();
    let (status, json) = send_json(
        &router,
        "POST",
        "/api/marketplace/trade",
        &json!({
            "proposer_user_id": seed::ALICE.to_string(),
            "proposer_nft_id": seed::TOKEN_1.to_string(),
            "target_nft_id": seed::TOKEN_3.to_string(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Trade successful!");
    assert_eq!(json["trade"]["counterparty_id"], seed::BOB.to_string());

    let (_, bob_tokens) = get(&router, &format!("/api/nfts/user/{}", seed::BOB)).await;
    let bob_ids: Vec<&Value> = bob_tokens
        .as_array()
        .unwrap()
        .iter()
        .map(|t| &t["_id"])
        .collect();
    assert!(bob_ids.contains(&&json!(seed::TOKEN_1.to_string())));
    assert!(!bob_ids.contains(&&json!(seed::TOKEN_3.to_string())));

    // Both traded tokens are off the market.
    let (_, market) = get(&router, &format!("/api/marketplace/{}", seed::CHARLIE)).await;
    assert_eq!(market.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_trade_for_unlisted_token_conflicts() {
    let router = make_router();
    let (status, json) = send_json(
        &router,
        "POST",
        "/api/marketplace/trade",
        &json!({
            "proposer_user_id": seed::ALICE.to_string(),
            "proposer_nft_id": seed::TOKEN_1.to_string(),
            "target_nft_id": seed::TOKEN_8.to_string(),
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["status"], 409);
}

#[tokio::test]
async fn test_trade_with_unknown_token_is_not_found() {
    let router = make_router();
    let (status, _) = send_json(
        &router,
        "POST",
        "/api/marketplace/trade",
        &json!({
            "proposer_user_id": seed::ALICE.to_string(),
            "proposer_nft_id": "00000000-0000-0000-0000-0000000000ff",
            "target_nft_id": seed::TOKEN_3.to_string(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =========================================================================
// Demo reset and latency
// =========================================================================

#[tokio::test]
async fn test_reset_restores_seed_data() {
    let state = make_state(0);
    let router = build_router(Arc::clone(&state));

    let _ = send_json(
        &router,
        "POST",
        "/api/auth/connect",
        &json!({"wallet_address": "0xEve"}),
    )
    .await;
    assert_eq!(state.store.read().await.tables().users.len(), 4);

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/demo/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let store = state.store.read().await;
    assert_eq!(store.tables().users.len(), 3);
    assert!(store.find_by_wallet("0xEve").is_none());
    assert!(store.check_invariants().is_ok());
}

#[tokio::test]
async fn test_simulated_latency_delays_api_requests() {
    let router = build_router(make_state(50));
    let started = Instant::now();

    let (status, _) = get(&router, &format!("/api/goals/user/{}", seed::ALICE)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(50));
}
