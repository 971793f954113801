//! Shared type definitions for GoalForge.
//!
//! This crate is the single source of truth for the data model shared by
//! the domain store, the REST API, and the browser client. Types flow to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for users, goals, tokens, and trades
//! - [`enums`] -- Goal status and token rarity
//! - [`structs`] -- Users, goals, tokens, marketplace listings, trade receipts

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{GoalStatus, Rarity};
pub use ids::{GoalId, TokenId, TradeId, UserId};
pub use structs::{Goal, MarketplaceListing, OwnerSummary, Token, TradeReceipt, User};
