//! Shared application state for the API server.
//!
//! [`AppState`] holds the single [`DomainStore`] behind an async
//! [`RwLock`]. Mutating handlers take the write lock for the whole store
//! operation and queries take the read lock, so no request can observe a
//! half-applied mint or trade.

use std::sync::Arc;
use std::time::Duration;

use goalforge_core::{ApiConfig, DomainStore};
use tokio::sync::RwLock;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The domain store.
    pub store: Arc<RwLock<DomainStore>>,
    /// Delay applied before every `/api` request. Zero disables it.
    pub simulated_latency: Duration,
}

impl AppState {
    /// Wrap `store` using the REST settings in `api`.
    pub fn new(store: DomainStore, api: &ApiConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            simulated_latency: Duration::from_millis(api.simulated_latency_ms),
        }
    }
}
