//! Leaderboard display-name publishing.

use crate::db::LeaderboardStore;
use crate::error::StoreResult;
use crate::models::User;
use std::sync::Arc;

/// Leaderboard label for a user.
///
/// First non-blank of custom name, username, first name; falls back to
/// the external ID.
pub fn display_name(user: &User) -> String {
    [&user.custom_name, &user.username, &user.first_name]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| user.external_id.to_string())
}

/// Writes display names to the leaderboard cache.
pub struct LeaderboardPublisher<L> {
    store: Arc<L>,
}

impl<L> Clone for LeaderboardPublisher<L> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<L: LeaderboardStore> LeaderboardPublisher<L> {
    pub fn new(store: Arc<L>) -> Self {
        Self { store }
    }

    pub async fn publish(&self, user: &User) -> StoreResult<()> {
        let name = display_name(user);
        self.store.set_user_data(&user.id, &name).await?;
        tracing::trace!(user_id = %user.id, display_name = %name, "Published leaderboard name");
        Ok(())
    }
}
