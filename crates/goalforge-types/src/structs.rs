//! Core entity structs for GoalForge.
//!
//! Field names on the wire follow the browser client's contract: every
//! entity id serialises as `_id`, and a token's owner as `user_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{GoalStatus, Rarity};
use crate::ids::{GoalId, TokenId, TradeId, UserId};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A connected user, identified by the wallet label they connected with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct User {
    /// Stable user identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// External wallet label. Not validated beyond being non-blank.
    pub wallet_address: String,
    /// Optional display name. Never set by the core; reserved for the client.
    pub username: Option<String>,
    /// When the user first connected.
    pub created_at: DateTime<Utc>,
    /// Tokens currently owned, in acquisition order.
    pub nfts: Vec<TokenId>,
}

impl User {
    /// Whether this user currently holds `token_id`.
    pub fn owns(&self, token_id: TokenId) -> bool {
        self.nfts.contains(&token_id)
    }

    /// Public projection of this user shown next to marketplace listings.
    pub fn summary(&self) -> OwnerSummary {
        OwnerSummary {
            id: self.id,
            wallet_address: self.wallet_address.clone(),
        }
    }
}

/// The minimal public view of a token owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OwnerSummary {
    /// Owner identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Owner wallet label.
    pub wallet_address: String,
}

// ---------------------------------------------------------------------------
// Goal
// ---------------------------------------------------------------------------

/// A user goal. Completing it mints exactly one reward token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Goal {
    /// Goal identifier.
    #[serde(rename = "_id")]
    pub id: GoalId,
    /// The user who created the goal. Immutable.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Current lifecycle state.
    pub status: GoalStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Completion time; `None` while active.
    pub completed_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A reward token minted when a goal is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Token {
    /// Token identifier.
    #[serde(rename = "_id")]
    pub id: TokenId,
    /// Current owner. Changes on trade.
    #[serde(rename = "user_id")]
    pub owner: UserId,
    /// The goal whose completion minted this token.
    pub goal_id: GoalId,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Rarity tier rolled at mint time.
    pub rarity: Rarity,
    /// Image reference drawn from the rarity's pool.
    pub image_url: String,
    /// Whether the token is offered on the marketplace.
    pub listed: bool,
    /// Mint time.
    pub created_at: DateTime<Utc>,
}

/// A marketplace entry: a listed token plus its owner's public summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarketplaceListing {
    /// The listed token.
    #[serde(flatten)]
    pub token: Token,
    /// Who currently owns it.
    pub owner: OwnerSummary,
}

// ---------------------------------------------------------------------------
// Trade
// ---------------------------------------------------------------------------

/// Record of a settled one-for-one token swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TradeReceipt {
    /// Unique trade identifier.
    pub trade_id: TradeId,
    /// The user who proposed the trade.
    pub proposer_id: UserId,
    /// The owner of the requested token before the swap.
    pub counterparty_id: UserId,
    /// Token given up by the proposer (now owned by the counterparty).
    pub proposer_token_id: TokenId,
    /// Token received by the proposer.
    pub target_token_id: TokenId,
    /// Settlement time.
    pub settled_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_token() -> Token {
        Token {
            id: TokenId::from_u128(1),
            owner: UserId::from_u128(2),
            goal_id: GoalId::from_u128(3),
            name: String::from("Epic Reward"),
            description: String::from("A unique reward for your dedication."),
            rarity: Rarity::Epic,
            image_url: String::from("/nfts/epic1.png"),
            listed: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_uses_client_field_names() {
        let value = serde_json::to_value(sample_token()).unwrap_or_default();
        assert!(value.get("_id").is_some());
        assert!(value.get("user_id").is_some());
        assert!(value.get("owner").is_none());
        assert_eq!(value["rarity"], "Epic");
    }

    #[test]
    fn listing_flattens_token_fields() {
        let listing = MarketplaceListing {
            token: sample_token(),
            owner: OwnerSummary {
                id: UserId::from_u128(2),
                wallet_address: String::from("0xBob456"),
            },
        };
        let value = serde_json::to_value(&listing).unwrap_or_default();
        assert_eq!(value["name"], "Epic Reward");
        assert_eq!(value["owner"]["wallet_address"], "0xBob456");
        assert_eq!(value["owner"]["_id"], value["user_id"]);
    }

    #[test]
    fn active_goal_serializes_null_completion() {
        let goal = Goal {
            id: GoalId::new(),
            user_id: UserId::new(),
            title: String::from("Run a 5K"),
            description: String::from("5km"),
            status: GoalStatus::Active,
            created_at: Utc::now(),
            completed_at: None,
        };
        let value = serde_json::to_value(&goal).unwrap_or_default();
        assert_eq!(value["status"], "active");
        assert!(value["completed_at"].is_null());
    }
}
