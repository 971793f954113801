//! REST API server for GoalForge.
//!
//! This crate exposes the domain store over an Axum HTTP server:
//!
//! - **Identity** (`/api/auth/connect`) for wallet-label sign-in
//! - **Goals** and **tokens** for per-user queries, goal completion, and
//!   marketplace listing
//! - **Marketplace** for browsing other users' listings and trading
//! - **Demo reset** and a `/health` probe
//!
//! # Architecture
//!
//! The store lives in [`AppState`] behind one async `RwLock`. Handlers
//! parse and validate request input, then perform a single store
//! operation under the lock. Store errors are mapped to HTTP statuses by
//! [`ApiError`].

pub mod error;
pub mod handlers;
pub mod latency;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, bind_addr, start_server};
pub use state::AppState;
