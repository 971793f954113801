//! Simulated network latency for demos.
//!
//! The browser client was first built against a mock backend that paused
//! before every call. This middleware reproduces those pauses against the
//! real server. The sleep happens before the handler runs, so the store
//! lock is never held while waiting.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Sleep for [`AppState::simulated_latency`] before any `/api` request.
pub async fn simulated_latency(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.simulated_latency.is_zero() && request.uri().path().starts_with("/api") {
        tokio::time::sleep(state.simulated_latency).await;
    }
    next.run(request).await
}
