//! Goal lifecycle: create, list, complete.
//!
//! Completing a goal mints its reward. The two steps form one logical
//! transaction: the goal is only marked completed once the mint has
//! succeeded, and a goal that is already completed is returned unchanged
//! without minting again.

use chrono::Utc;
use goalforge_types::{Goal, GoalId, GoalStatus, UserId};
use rand::Rng;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::rewards::mint_into;
use crate::store::DomainStore;

/// Trim `value` and reject it if nothing is left.
fn required(value: &str, field: &'static str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation { field });
    }
    Ok(trimmed.to_owned())
}

impl<R> DomainStore<R> {
    /// Create an active goal for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if `title` or `description` is
    /// blank, or [`StoreError::UserNotFound`] if the user does not exist.
    pub fn create_goal(
        &mut self,
        user_id: UserId,
        title: &str,
        description: &str,
    ) -> Result<Goal, StoreError> {
        let title = required(title, "title")?;
        let description = required(description, "description")?;
        if !self.tables.users.contains_key(&user_id) {
            return Err(StoreError::UserNotFound(user_id));
        }

        let goal = Goal {
            id: GoalId::new(),
            user_id,
            title,
            description,
            status: GoalStatus::Active,
            created_at: Utc::now(),
            completed_at: None,
        };
        self.tables.goals.insert(goal.id, goal.clone());

        info!(goal_id = %goal.id, user_id = %user_id, title = goal.title, "Goal created");
        Ok(goal)
    }

    /// Every goal owned by `user_id`, oldest first.
    ///
    /// An unknown user yields an empty list.
    pub fn list_goals_for_user(&self, user_id: UserId) -> Vec<Goal> {
        let mut goals: Vec<Goal> = self
            .tables
            .goals
            .values()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        debug!(user_id = %user_id, count = goals.len(), "Listed user goals");
        goals
    }
}

impl<R: Rng> DomainStore<R> {
    /// Mark a goal completed and mint its reward token for the goal's owner.
    ///
    /// Idempotent: completing an already-completed goal returns it as-is
    /// and mints nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GoalNotFound`] if the goal does not exist, or
    /// [`StoreError::UserNotFound`] if its owner is gone. In both cases the
    /// store is unchanged.
    pub fn complete_goal(&mut self, goal_id: GoalId) -> Result<Goal, StoreError> {
        let Self {
            tables,
            rewards,
            rng,
        } = self;

        let goal = tables
            .goals
            .get_mut(&goal_id)
            .ok_or(StoreError::GoalNotFound(goal_id))?;
        if goal.status.is_completed() {
            debug!(goal_id = %goal_id, "Goal already completed; no reward minted");
            return Ok(goal.clone());
        }

        let now = Utc::now();
        let token = mint_into(
            &mut tables.users,
            &mut tables.tokens,
            rewards,
            rng,
            goal.user_id,
            goal_id,
            now,
        )?;

        goal.status = GoalStatus::Completed;
        goal.completed_at = Some(now);

        let completed = goal.clone();
        info!(goal_id = %goal_id, token_id = %token.id, "Goal completed");
        self.trace_invariants("complete_goal");
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::RewardConfig;
    use crate::seed;

    fn store() -> DomainStore<SmallRng> {
        DomainStore::seeded(RewardConfig::default(), SmallRng::seed_from_u64(42))
    }

    #[test]
    fn create_goal_starts_active() {
        let mut store = store();
        let goal = store.create_goal(seed::ALICE, "Run a 5K", "5km");
        assert!(goal.is_ok());
        let goal = goal.unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(goal.user_id, seed::ALICE);
        assert_eq!(goal.status, GoalStatus::Active);
        assert!(goal.completed_at.is_none());
        assert_eq!(store.goal(goal.id), Some(&goal));
    }

    #[test]
    fn create_goal_trims_fields() {
        let mut store = store();
        let goal = store.create_goal(seed::BOB, "  Swim  ", "\tlaps\n");
        assert_eq!(goal.as_ref().map(|g| g.title.as_str()), Ok("Swim"));
        assert_eq!(goal.as_ref().map(|g| g.description.as_str()), Ok("laps"));
    }

    #[test]
    fn create_goal_rejects_blank_fields() {
        let mut store = store();
        assert_eq!(
            store.create_goal(seed::ALICE, "   ", "desc"),
            Err(StoreError::Validation { field: "title" })
        );
        assert_eq!(
            store.create_goal(seed::ALICE, "title", ""),
            Err(StoreError::Validation { field: "description" })
        );
        assert_eq!(store.list_goals_for_user(seed::ALICE).len(), 5);
    }

    #[test]
    fn create_goal_rejects_unknown_user() {
        let mut store = store();
        let stranger = UserId::new();
        assert_eq!(
            store.create_goal(stranger, "title", "desc"),
            Err(StoreError::UserNotFound(stranger))
        );
    }

    #[test]
    fn list_goals_is_per_user_and_oldest_first() {
        let store = store();
        let alice: Vec<GoalId> = store
            .list_goals_for_user(seed::ALICE)
            .iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(
            alice,
            vec![seed::GOAL_1, seed::GOAL_2, seed::GOAL_5, seed::GOAL_6, seed::GOAL_7]
        );
        assert_eq!(store.list_goals_for_user(seed::BOB).len(), 3);
        assert!(store.list_goals_for_user(seed::CHARLIE).is_empty());
        assert!(store.list_goals_for_user(UserId::new()).is_empty());
    }

    #[test]
    fn complete_goal_mints_one_token() {
        let mut store = store();
        let goal = store
            .create_goal(seed::ALICE, "Run a 5K", "5km")
            .unwrap_or_else(|e| panic!("{e}"));
        let before = store.list_tokens_for_user(seed::ALICE).len();

        let done = store.complete_goal(goal.id).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(done.status, GoalStatus::Completed);
        assert!(done.completed_at.is_some());
        let tokens = store.list_tokens_for_user(seed::ALICE);
        assert_eq!(tokens.len(), before + 1);
        assert_eq!(tokens.last().map(|t| t.goal_id), Some(goal.id));
        assert!(store.check_invariants().is_ok());
    }

    #[test]
    fn complete_goal_is_idempotent() {
        let mut store = store();
        let first = store.complete_goal(seed::GOAL_2).unwrap_or_else(|e| panic!("{e}"));
        let tokens_after_first = store.tables().tokens.len();

        let second = store.complete_goal(seed::GOAL_2).unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(first, second);
        assert_eq!(store.tables().tokens.len(), tokens_after_first);
    }

    #[test]
    fn completing_seeded_completed_goal_mints_nothing() {
        let mut store = store();
        let before = store.tables().clone();
        let goal = store.complete_goal(seed::GOAL_1);
        assert_eq!(goal.map(|g| g.status), Ok(GoalStatus::Completed));
        assert_eq!(store.tables(), &before);
    }

    #[test]
    fn complete_unknown_goal_is_not_found() {
        let mut store = store();
        let missing = GoalId::new();
        assert_eq!(store.complete_goal(missing), Err(StoreError::GoalNotFound(missing)));
    }

    #[test]
    fn failed_mint_leaves_goal_active() {
        let mut store = store();
        let goal = store
            .create_goal(seed::CHARLIE, "Forge", "Hammer time")
            .unwrap_or_else(|e| panic!("{e}"));
        // Owner disappears between creation and completion.
        store.tables.users.remove(&seed::CHARLIE);
        let tokens_before = store.tables().tokens.len();

        let result = store.complete_goal(goal.id);

        assert_eq!(result, Err(StoreError::UserNotFound(seed::CHARLIE)));
        assert_eq!(store.goal(goal.id).map(|g| g.status), Some(GoalStatus::Active));
        assert_eq!(store.tables().tokens.len(), tokens_before);
    }
}
