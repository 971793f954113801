//! Marketplace view and one-for-one token trades.
//!
//! A trade runs in two phases:
//!
//! 1. [`DomainStore::plan_trade`] -- resolve both tokens and both users and
//!    check every precondition. No mutations occur.
//! 2. `settle` -- swap owners, unlist both tokens, and move the ids between
//!    the two users' `nfts` lists.
//!
//! Settlement only runs on a validated plan, so the four-part change is
//! applied in full or not at all.

use chrono::Utc;
use goalforge_types::{MarketplaceListing, TokenId, TradeId, TradeReceipt, UserId};
use tracing::{debug, info};

use crate::error::{StoreError, TradeRejection};
use crate::store::{DomainStore, Tables};

/// A validated trade, ready to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradePlan {
    /// The user offering a token.
    pub proposer_id: UserId,
    /// The current owner of the requested token.
    pub counterparty_id: UserId,
    /// Token the proposer gives up.
    pub proposer_token_id: TokenId,
    /// Token the proposer receives.
    pub target_token_id: TokenId,
}

/// Apply a validated plan. Every lookup is known to succeed.
fn settle(tables: &mut Tables, plan: &TradePlan) {
    if let Some(token) = tables.tokens.get_mut(&plan.proposer_token_id) {
        token.owner = plan.counterparty_id;
        token.listed = false;
    }
    if let Some(token) = tables.tokens.get_mut(&plan.target_token_id) {
        token.owner = plan.proposer_id;
        token.listed = false;
    }
    if let Some(proposer) = tables.users.get_mut(&plan.proposer_id) {
        proposer.nfts.retain(|id| *id != plan.proposer_token_id);
        proposer.nfts.push(plan.target_token_id);
    }
    if let Some(counterparty) = tables.users.get_mut(&plan.counterparty_id) {
        counterparty.nfts.retain(|id| *id != plan.target_token_id);
        counterparty.nfts.push(plan.proposer_token_id);
    }
}

impl<R> DomainStore<R> {
    /// Every listed token not owned by `user_id`, with its owner's summary.
    ///
    /// Listings whose owner cannot be resolved are skipped.
    pub fn list_marketplace(&self, user_id: UserId) -> Vec<MarketplaceListing> {
        let listings: Vec<MarketplaceListing> = self
            .tables
            .tokens
            .values()
            .filter(|t| t.listed && t.owner != user_id)
            .filter_map(|t| {
                self.tables.users.get(&t.owner).map(|owner| MarketplaceListing {
                    token: t.clone(),
                    owner: owner.summary(),
                })
            })
            .collect();

        debug!(user_id = %user_id, count = listings.len(), "Listed marketplace");
        listings
    }

    /// Resolve and validate a trade without changing anything.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UserNotFound`] if the proposer or the target's owner
    ///   does not exist.
    /// - [`StoreError::TokenNotFound`] if either token does not exist.
    /// - [`StoreError::InvalidTrade`] if the tokens are the same, the
    ///   proposer does not own the offered token, the target is not listed,
    ///   or the target already belongs to the proposer.
    pub fn plan_trade(
        &self,
        proposer_id: UserId,
        proposer_token_id: TokenId,
        target_token_id: TokenId,
    ) -> Result<TradePlan, StoreError> {
        if !self.tables.users.contains_key(&proposer_id) {
            return Err(StoreError::UserNotFound(proposer_id));
        }
        let offered = self
            .tables
            .tokens
            .get(&proposer_token_id)
            .ok_or(StoreError::TokenNotFound(proposer_token_id))?;
        let target = self
            .tables
            .tokens
            .get(&target_token_id)
            .ok_or(StoreError::TokenNotFound(target_token_id))?;
        if !self.tables.users.contains_key(&target.owner) {
            return Err(StoreError::UserNotFound(target.owner));
        }

        let rejection = if proposer_token_id == target_token_id {
            Some(TradeRejection::SameToken)
        } else if offered.owner != proposer_id {
            Some(TradeRejection::ProposerDoesNotOwnToken)
        } else if target.owner == proposer_id {
            Some(TradeRejection::TargetAlreadyOwned)
        } else if !target.listed {
            Some(TradeRejection::TargetNotListed)
        } else {
            None
        };
        if let Some(reason) = rejection {
            return Err(StoreError::InvalidTrade(reason));
        }

        Ok(TradePlan {
            proposer_id,
            counterparty_id: target.owner,
            proposer_token_id,
            target_token_id,
        })
    }

    /// Swap `proposer_token_id` (owned by `proposer_id`) for the listed
    /// `target_token_id`. Both tokens end up unlisted.
    ///
    /// # Errors
    ///
    /// See [`plan_trade`](Self::plan_trade). On error the store is unchanged.
    pub fn execute_trade(
        &mut self,
        proposer_id: UserId,
        proposer_token_id: TokenId,
        target_token_id: TokenId,
    ) -> Result<TradeReceipt, StoreError> {
        let plan = self.plan_trade(proposer_id, proposer_token_id, target_token_id)?;
        settle(&mut self.tables, &plan);

        let receipt = TradeReceipt {
            trade_id: TradeId::new(),
            proposer_id: plan.proposer_id,
            counterparty_id: plan.counterparty_id,
            proposer_token_id: plan.proposer_token_id,
            target_token_id: plan.target_token_id,
            settled_at: Utc::now(),
        };

        info!(
            trade_id = %receipt.trade_id,
            proposer = %receipt.proposer_id,
            counterparty = %receipt.counterparty_id,
            gave = %receipt.proposer_token_id,
            received = %receipt.target_token_id,
            "Trade settled"
        );
        self.trace_invariants("execute_trade");
        Ok(receipt)
    }
}
