//! Reward tokens: minting, per-user listing, and marketplace listing toggle.
//!
//! A token is minted exactly once, when its goal completes. Rarity is rolled
//! from [`RarityWeights`] with the store's random source; the image is a
//! uniform pick from the rarity's pool in [`RewardConfig`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use goalforge_types::{GoalId, Rarity, Token, TokenId, User, UserId};
use rand::Rng;
use tracing::{debug, info};

use crate::config::{RarityWeights, RewardConfig};
use crate::error::StoreError;
use crate::store::DomainStore;

/// Description stamped on every minted token.
pub const REWARD_DESCRIPTION: &str = "A unique reward for your dedication.";

/// Roll a rarity from `weights`. An all-zero table is treated as uniform.
pub fn roll_rarity(weights: &RarityWeights, rng: &mut impl Rng) -> Rarity {
    let weights = if weights.total() == 0 {
        &RarityWeights::UNIFORM
    } else {
        weights
    };

    let mut roll = rng.random_range(0..weights.total());
    for rarity in Rarity::ALL {
        let weight = u64::from(weights.weight(rarity));
        if roll < weight {
            return rarity;
        }
        roll = roll.saturating_sub(weight);
    }
    // Unreachable while roll < total; keeps the function total.
    Rarity::Common
}

/// Pick an image for `rarity` from the configured pool, falling back to
/// `config.fallback_image` when the pool is missing or empty.
pub fn pick_image(config: &RewardConfig, rarity: Rarity, rng: &mut impl Rng) -> String {
    config
        .image_pools
        .get(&rarity)
        .filter(|pool| !pool.is_empty())
        .and_then(|pool| pool.get(rng.random_range(0..pool.len())))
        .unwrap_or(&config.fallback_image)
        .clone()
}

/// Roll a fresh token for `owner`. Nothing is inserted.
fn roll_token(
    config: &RewardConfig,
    rng: &mut impl Rng,
    owner: UserId,
    goal_id: GoalId,
    now: DateTime<Utc>,
) -> Token {
    let rarity = roll_rarity(&config.rarity_weights, rng);
    Token {
        id: TokenId::new(),
        owner,
        goal_id,
        name: format!("{rarity} Reward"),
        description: REWARD_DESCRIPTION.to_owned(),
        rarity,
        image_url: pick_image(config, rarity, rng),
        listed: false,
        created_at: now,
    }
}

/// Mint a token into the given tables.
///
/// The owner is resolved first; if it is missing nothing changes. Otherwise
/// the token row and the owner's `nfts` entry are written together.
pub(crate) fn mint_into(
    users: &mut BTreeMap<UserId, User>,
    tokens: &mut BTreeMap<TokenId, Token>,
    config: &RewardConfig,
    rng: &mut impl Rng,
    owner: UserId,
    goal_id: GoalId,
    now: DateTime<Utc>,
) -> Result<Token, StoreError> {
    let user = users.get_mut(&owner).ok_or(StoreError::UserNotFound(owner))?;
    let token = roll_token(config, rng, owner, goal_id, now);
    user.nfts.push(token.id);
    tokens.insert(token.id, token.clone());

    info!(
        token_id = %token.id,
        user_id = %owner,
        goal_id = %goal_id,
        rarity = %token.rarity,
        "Reward token minted"
    );
    Ok(token)
}

impl<R: Rng> DomainStore<R> {
    /// Mint a reward token for `user_id`, attributed to `goal_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UserNotFound`] if the user does not exist; the
    /// store is left unchanged.
    pub fn mint_token(&mut self, user_id: UserId, goal_id: GoalId) -> Result<Token, StoreError> {
        let Self {
            tables,
            rewards,
            rng,
        } = self;
        let token = mint_into(
            &mut tables.users,
            &mut tables.tokens,
            rewards,
            rng,
            user_id,
            goal_id,
            Utc::now(),
        )?;
        self.trace_invariants("mint_token");
        Ok(token)
    }
}

impl<R> DomainStore<R> {
    /// Tokens owned by `user_id`, in acquisition order.
    ///
    /// An unknown user yields an empty list rather than an error.
    pub fn list_tokens_for_user(&self, user_id: UserId) -> Vec<Token> {
        let tokens: Vec<Token> = self
            .tables
            .users
            .get(&user_id)
            .map(|user| {
                user.nfts
                    .iter()
                    .filter_map(|id| self.tables.tokens.get(id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        debug!(user_id = %user_id, count = tokens.len(), "Listed user tokens");
        tokens
    }

    /// Flip the marketplace `listed` flag of a token owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TokenNotFound`] if the token does not exist, or
    /// [`StoreError::NotOwner`] if `user_id` is not its current owner.
    pub fn toggle_listing(&mut self, token_id: TokenId, user_id: UserId) -> Result<Token, StoreError> {
        let token = self
            .tables
            .tokens
            .get_mut(&token_id)
            .ok_or(StoreError::TokenNotFound(token_id))?;
        if token.owner != user_id {
            return Err(StoreError::NotOwner { token_id, user_id });
        }

        token.listed = !token.listed;
        info!(token_id = %token_id, listed = token.listed, "Token listing toggled");
        Ok(token.clone())
    }
}
