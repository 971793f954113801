//! Axum router construction for the REST API.

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::latency;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// See [`handlers`] for the route table. CORS allows any origin so the
/// browser client can be served from a different port.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/auth/connect", post(handlers::connect))
        .route("/api/goals", post(handlers::create_goal))
        .route("/api/goals/user/{user_id}", get(handlers::list_goals))
        .route("/api/goals/{goal_id}/complete", put(handlers::complete_goal))
        .route("/api/nfts/user/{user_id}", get(handlers::list_tokens))
        .route("/api/nfts/{nft_id}/list", put(handlers::toggle_listing))
        .route("/api/marketplace/trade", post(handlers::trade))
        .route("/api/marketplace/{user_id}", get(handlers::marketplace))
        .route("/api/demo/reset", post(handlers::reset))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            latency::simulated_latency,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
