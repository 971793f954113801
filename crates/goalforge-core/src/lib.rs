//! Domain logic for GoalForge: users, goals, reward tokens, and trades.
//!
//! Everything here operates on the in-memory [`DomainStore`] without touching
//! I/O. It sits between `goalforge-types` (the shared data model) and the API
//! and server crates (transport and process wiring).
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration ([`GoalForgeConfig`])
//! - [`error`] -- Error types for store operations ([`StoreError`])
//! - [`goals`] -- Goal creation, listing, and completion
//! - [`identity`] -- Wallet connect ([`Connection`])
//! - [`marketplace`] -- Marketplace view and token trades ([`TradePlan`])
//! - [`rewards`] -- Reward minting, rarity rolls, listing toggle
//! - [`seed`] -- The fixed demo dataset
//! - [`store`] -- The store itself ([`DomainStore`], [`Tables`])

pub mod config;
pub mod error;
pub mod goals;
pub mod identity;
pub mod marketplace;
pub mod rewards;
pub mod seed;
pub mod store;

// Re-export primary types at crate root for convenience.
pub use config::{
    ApiConfig, ConfigError, GoalForgeConfig, RarityWeights, RewardConfig, ServerConfig,
    StoreConfig,
};
pub use error::{ErrorKind, InvariantViolation, StoreError, TradeRejection};
pub use identity::Connection;
pub use marketplace::TradePlan;
pub use rewards::{REWARD_DESCRIPTION, pick_image, roll_rarity};
pub use store::{DomainStore, Tables};
