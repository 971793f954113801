//! The in-memory domain store.
//!
//! [`DomainStore`] owns the three entity tables (users, goals, tokens) and
//! the random source used for reward rolls. It is the single source of
//! truth for a running GoalForge instance and is passed by handle to every
//! consumer; there is no global state.
//!
//! Operations are split across modules by concern, each adding an `impl`
//! block:
//!
//! - [`identity`](crate::identity) -- `connect`
//! - [`goals`](crate::goals) -- goal creation, listing, completion
//! - [`rewards`](crate::rewards) -- minting, token listing, listing toggle
//! - [`marketplace`](crate::marketplace) -- marketplace view and trades
//!
//! # Atomicity
//!
//! Mutating operations take `&mut self` and check every precondition before
//! touching a table, so a caller can never observe a half-applied mint or
//! trade. Shared access across tasks is the transport's job (the API crate
//! wraps the store in an async `RwLock`).

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use goalforge_types::{Goal, GoalId, Token, TokenId, User, UserId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info};

use crate::config::{RewardConfig, StoreConfig};
use crate::error::InvariantViolation;
use crate::seed;

/// The three entity tables.
///
/// Keyed by id; iteration order is id order, which for freshly created
/// entities (UUID v7) roughly tracks creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    /// Users keyed by id.
    pub users: BTreeMap<UserId, User>,
    /// Goals keyed by id.
    pub goals: BTreeMap<GoalId, Goal>,
    /// Tokens keyed by id.
    pub tokens: BTreeMap<TokenId, Token>,
}

/// In-memory store for users, goals, and reward tokens.
///
/// Generic over the random source so tests can inject a seeded generator.
#[derive(Debug)]
pub struct DomainStore<R = StdRng> {
    pub(crate) tables: Tables,
    pub(crate) rewards: RewardConfig,
    pub(crate) rng: R,
}

impl DomainStore<StdRng> {
    /// Create an empty store with default reward settings, seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(RewardConfig::default(), StdRng::from_os_rng())
    }

    /// Create a store as described by `config`: seeded from `config.seed`
    /// when present, loaded with the demo dataset when
    /// `config.load_seed_data` is set.
    pub fn from_config(config: &StoreConfig, rewards: RewardConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let mut store = Self::with_rng(rewards, rng);
        if config.load_seed_data {
            store.reset();
        }
        store
    }
}

impl Default for DomainStore<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: rand::Rng> DomainStore<R> {
    /// Create an empty store using the given reward settings and random source.
    pub fn with_rng(rewards: RewardConfig, rng: R) -> Self {
        Self {
            tables: Tables::default(),
            rewards,
            rng,
        }
    }

    /// Create a store using `rng` and load the seed dataset.
    pub fn seeded(rewards: RewardConfig, rng: R) -> Self {
        let mut store = Self::with_rng(rewards, rng);
        store.reset();
        store
    }

    /// Discard all state and reload the fixed seed dataset.
    pub fn reset(&mut self) {
        self.tables = seed::seed_tables(Utc::now(), &self.rewards, &mut self.rng);
        info!(
            users = self.tables.users.len(),
            goals = self.tables.goals.len(),
            tokens = self.tables.tokens.len(),
            "Store reset to seed data"
        );
        self.trace_invariants("reset");
    }
}

impl<R> DomainStore<R> {
    /// Read-only view of the tables.
    pub const fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Reward settings used when minting.
    pub const fn reward_config(&self) -> &RewardConfig {
        &self.rewards
    }

    /// Look up a user by id.
    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.tables.users.get(&user_id)
    }

    /// Look up a goal by id.
    pub fn goal(&self, goal_id: GoalId) -> Option<&Goal> {
        self.tables.goals.get(&goal_id)
    }

    /// Look up a token by id.
    pub fn token(&self, token_id: TokenId) -> Option<&Token> {
        self.tables.tokens.get(&token_id)
    }

    /// Verify that every user's `nfts` list is exactly the set of tokens it
    /// owns, and that every token's owner exists.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for token in self.tables.tokens.values() {
            let owner = self
                .tables
                .users
                .get(&token.owner)
                .ok_or(InvariantViolation::OrphanToken {
                    token_id: token.id,
                    owner: token.owner,
                })?;
            if !owner.owns(token.id) {
                return Err(InvariantViolation::UnlistedOwnership {
                    token_id: token.id,
                    owner: token.owner,
                });
            }
        }

        for user in self.tables.users.values() {
            let mut seen = BTreeSet::new();
            for token_id in &user.nfts {
                if !seen.insert(*token_id) {
                    return Err(InvariantViolation::DuplicateReference {
                        user_id: user.id,
                        token_id: *token_id,
                    });
                }
                let owned_here = self
                    .tables
                    .tokens
                    .get(token_id)
                    .is_some_and(|t| t.owner == user.id);
                if !owned_here {
                    return Err(InvariantViolation::DanglingReference {
                        user_id: user.id,
                        token_id: *token_id,
                    });
                }
            }
        }

        Ok(())
    }

    /// Run [`check_invariants`](Self::check_invariants) when debug logging
    /// is enabled and log the outcome.
    pub(crate) fn trace_invariants(&self, operation: &'static str) {
        if tracing::enabled!(tracing::Level::DEBUG) {
            match self.check_invariants() {
                Ok(()) => debug!(operation, "Ownership invariants hold"),
                Err(violation) => error!(operation, %violation, "Ownership invariant violated"),
            }
        }
    }
}
