//! Wallet connect: look up a user by wallet label, creating it on first use.

use chrono::Utc;
use goalforge_types::{User, UserId};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::DomainStore;

/// Result of [`DomainStore::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Snapshot of the connected user.
    pub user: User,
    /// `true` if this call created the user.
    pub created: bool,
}

impl<R> DomainStore<R> {
    /// Connect with `wallet_address`, returning the existing user or a newly
    /// created one with no tokens.
    ///
    /// Lookup is an exact match on the label as given.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the label is blank.
    pub fn connect(&mut self, wallet_address: &str) -> Result<Connection, StoreError> {
        if wallet_address.trim().is_empty() {
            return Err(StoreError::Validation {
                field: "wallet_address",
            });
        }

        if let Some(user) = self.find_by_wallet(wallet_address) {
            debug!(user_id = %user.id, "Existing user connected");
            return Ok(Connection {
                user: user.clone(),
                created: false,
            });
        }

        let user = User {
            id: UserId::new(),
            wallet_address: wallet_address.to_owned(),
            username: None,
            created_at: Utc::now(),
            nfts: Vec::new(),
        };
        self.tables.users.insert(user.id, user.clone());

        info!(user_id = %user.id, wallet = wallet_address, "New user created");
        Ok(Connection {
            user,
            created: true,
        })
    }

    /// Find the user registered under `wallet_address`.
    pub fn find_by_wallet(&self, wallet_address: &str) -> Option<&User> {
        self.tables
            .users
            .values()
            .find(|u| u.wallet_address == wallet_address)
    }
}
