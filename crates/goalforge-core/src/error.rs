//! Error types for the goalforge-core crate.
//!
//! Every store operation that can fail returns a [`StoreError`]. A failed
//! operation never leaves a partial mutation behind: all preconditions are
//! checked before the first table is touched.

use goalforge_types::{GoalId, TokenId, UserId};

/// Coarse classification of a [`StoreError`], used by transports to pick a
/// status code without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input (blank required fields).
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// The caller does not own the entity it tried to change.
    Permission,
    /// A trade failed one of its preconditions.
    InvalidTrade,
}

/// Why a trade was refused before any state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeRejection {
    /// Both sides named the same token.
    SameToken,
    /// The offered token is not owned by the proposer.
    ProposerDoesNotOwnToken,
    /// The requested token is not listed on the marketplace.
    TargetNotListed,
    /// The requested token already belongs to the proposer.
    TargetAlreadyOwned,
}

impl core::fmt::Display for TradeRejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::SameToken => "cannot trade a token for itself",
            Self::ProposerDoesNotOwnToken => "offered token is not owned by the proposer",
            Self::TargetNotListed => "requested token is not listed for trade",
            Self::TargetAlreadyOwned => "requested token already belongs to the proposer",
        };
        f.write_str(msg)
    }
}

/// Errors returned by [`DomainStore`](crate::DomainStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A required text field was empty after trimming.
    #[error("{field} is required")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
    },

    /// No user with the given ID exists.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// No goal with the given ID exists.
    #[error("goal not found: {0}")]
    GoalNotFound(GoalId),

    /// No token with the given ID exists.
    #[error("token not found: {0}")]
    TokenNotFound(TokenId),

    /// The caller tried to change a token it does not own.
    #[error("user {user_id} does not own token {token_id}")]
    NotOwner {
        /// The token being changed.
        token_id: TokenId,
        /// The user who attempted the change.
        user_id: UserId,
    },

    /// A trade was refused.
    #[error("invalid trade: {0}")]
    InvalidTrade(TradeRejection),
}

impl StoreError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::UserNotFound(_) | Self::GoalNotFound(_) | Self::TokenNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::NotOwner { .. } => ErrorKind::Permission,
            Self::InvalidTrade(_) => ErrorKind::InvalidTrade,
        }
    }
}

/// A breach of the bidirectional ownership invariant between users and
/// tokens. Only reachable through a bug; reported by
/// [`DomainStore::check_invariants`](crate::DomainStore::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// A token names an owner that is not in the user table.
    #[error("token {token_id} is owned by unknown user {owner}")]
    OrphanToken {
        /// The orphaned token.
        token_id: TokenId,
        /// The missing owner.
        owner: UserId,
    },

    /// A token's owner does not list it.
    #[error("user {owner} does not list owned token {token_id}")]
    UnlistedOwnership {
        /// The token.
        token_id: TokenId,
        /// Its owner.
        owner: UserId,
    },

    /// A user lists a token that is missing or owned by someone else.
    #[error("user {user_id} lists token {token_id} it does not own")]
    DanglingReference {
        /// The user holding the stale reference.
        user_id: UserId,
        /// The referenced token.
        token_id: TokenId,
    },

    /// A user lists the same token twice.
    #[error("user {user_id} lists token {token_id} more than once")]
    DuplicateReference {
        /// The user.
        user_id: UserId,
        /// The duplicated token.
        token_id: TokenId,
    },
}
