//! Enumeration types for GoalForge.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Goal status
// ---------------------------------------------------------------------------

/// Lifecycle state of a goal.
///
/// The transition is monotonic: `Active -> Completed`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum GoalStatus {
    /// The goal is still being worked on.
    Active,
    /// The goal was completed and its reward minted.
    Completed,
}

impl GoalStatus {
    /// Whether the goal has reached its terminal state.
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

/// Rarity tier of a reward token, ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Rarity {
    /// The most frequent tier.
    Common,
    /// Uncommon rewards.
    Rare,
    /// Scarce rewards.
    Epic,
    /// The scarcest tier.
    Legendary,
}

impl Rarity {
    /// Every rarity, in scarcity order.
    pub const ALL: [Self; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    /// Display label, as used in token names (`"Epic Reward"`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

impl core::fmt::Display for Rarity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
