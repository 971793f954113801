//! REST API endpoint handlers.
//!
//! Every handler locks the shared [`DomainStore`](goalforge_core::DomainStore)
//! through [`AppState`] for exactly one store operation.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness probe |
//! | `POST` | `/api/auth/connect` | Connect a wallet label (200 existing, 201 new) |
//! | `POST` | `/api/goals` | Create a goal |
//! | `GET` | `/api/goals/user/{user_id}` | List a user's goals |
//! | `PUT` | `/api/goals/{goal_id}/complete` | Complete a goal, minting its reward |
//! | `GET` | `/api/nfts/user/{user_id}` | List a user's tokens |
//! | `PUT` | `/api/nfts/{nft_id}/list` | Toggle a token's marketplace listing |
//! | `GET` | `/api/marketplace/{user_id}` | Listings visible to a user |
//! | `POST` | `/api/marketplace/trade` | Swap two tokens |
//! | `POST` | `/api/demo/reset` | Reload the demo dataset |

use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use goalforge_types::{Goal, GoalId, MarketplaceListing, Token, TokenId, User, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// Plain-text body returned by `GET /health`.
pub const HEALTH_MESSAGE: &str = "Backend is running!";

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/auth/connect`.
#[derive(Debug, serde::Deserialize)]
pub struct ConnectRequest {
    /// The wallet label to connect with.
    #[serde(default)]
    pub wallet_address: String,
}

/// Body of `POST /api/goals`.
#[derive(Debug, serde::Deserialize)]
pub struct CreateGoalRequest {
    /// Owner of the new goal.
    #[serde(default)]
    pub user_id: String,
    /// Goal title.
    #[serde(default)]
    pub title: String,
    /// Goal description.
    #[serde(default)]
    pub description: String,
}

/// Body of `PUT /api/nfts/{nft_id}/list`.
#[derive(Debug, serde::Deserialize)]
pub struct ToggleListingRequest {
    /// The user asking to toggle; must own the token.
    #[serde(default)]
    pub user_id: String,
}

/// Body of `POST /api/marketplace/trade`.
#[derive(Debug, serde::Deserialize)]
pub struct TradeRequest {
    /// The user proposing the trade.
    #[serde(default)]
    pub proposer_user_id: String,
    /// Token the proposer gives up.
    #[serde(default)]
    pub proposer_nft_id: String,
    /// Listed token the proposer wants.
    #[serde(default)]
    pub target_nft_id: String,
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
#[allow(clippy::unused_async)]
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

// ---------------------------------------------------------------------------
// POST /api/auth/connect
// ---------------------------------------------------------------------------

/// Connect a wallet label, creating the user on first sight.
///
/// Answers `201 Created` for a new user and `200 OK` for an existing one.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ConnectRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let connection = state.store.write().await.connect(&body.wallet_address)?;
    let status = if connection.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(connection.user)))
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// Create an active goal.
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    let user_id: UserId = parse_id("user_id", &body.user_id)?;
    let goal = state
        .store
        .write()
        .await
        .create_goal(user_id, &body.title, &body.description)?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// List a user's goals, oldest first.
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let user_id: UserId = parse_id("user_id", &user_id)?;
    Ok(Json(state.store.read().await.list_goals_for_user(user_id)))
}

/// Complete a goal and mint its reward token.
pub async fn complete_goal(
    State(state): State<Arc<AppState>>,
    Path(goal_id): Path<String>,
) -> Result<Json<Goal>, ApiError> {
    let goal_id: GoalId = parse_id("goal_id", &goal_id)?;
    let goal = state.store.write().await.complete_goal(goal_id)?;
    Ok(Json(goal))
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// List a user's tokens in acquisition order.
pub async fn list_tokens(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Token>>, ApiError> {
    let user_id: UserId = parse_id("user_id", &user_id)?;
    Ok(Json(state.store.read().await.list_tokens_for_user(user_id)))
}

/// Flip a token's marketplace listing on behalf of its owner.
pub async fn toggle_listing(
    State(state): State<Arc<AppState>>,
    Path(nft_id): Path<String>,
    Json(body): Json<ToggleListingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token_id: TokenId = parse_id("nft_id", &nft_id)?;
    let user_id: UserId = parse_id("user_id", &body.user_id)?;
    let token = state.store.write().await.toggle_listing(token_id, user_id)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "listed": token.listed,
        "nft": token,
    })))
}

// ---------------------------------------------------------------------------
// Marketplace
// ---------------------------------------------------------------------------

/// Listed tokens owned by anyone other than `user_id`.
pub async fn marketplace(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<MarketplaceListing>>, ApiError> {
    let user_id: UserId = parse_id("user_id", &user_id)?;
    Ok(Json(state.store.read().await.list_marketplace(user_id)))
}

/// Swap the proposer's token for a listed one.
pub async fn trade(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TradeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let proposer: UserId = parse_id("proposer_user_id", &body.proposer_user_id)?;
    let offered: TokenId = parse_id("proposer_nft_id", &body.proposer_nft_id)?;
    let target: TokenId = parse_id("target_nft_id", &body.target_nft_id)?;

    let receipt = state
        .store
        .write()
        .await
        .execute_trade(proposer, offered, target)?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Trade successful!",
        "trade": receipt,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/demo/reset
// ---------------------------------------------------------------------------

/// Discard all state and reload the demo dataset.
pub async fn reset(State(state): State<Arc<AppState>>) -> StatusCode {
    state.store.write().await.reset();
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a typed id, returning [`ApiError::InvalidId`] on failure.
fn parse_id<T: FromStr>(field: &'static str, value: &str) -> Result<T, ApiError> {
    value.trim().parse::<T>().map_err(|_err| ApiError::InvalidId {
        field,
        value: value.to_owned(),
    })
}
