//! Store ports used by the auth middleware.
//!
//! The concrete clients (record database, TTL cache, leaderboard cache) are
//! injected by the host process. `memory` provides in-process versions.

pub mod memory;

pub use memory::{MemoryLeaderboard, MemorySessionStore, MemoryUserRepository};

use crate::error::StoreResult;
use crate::models::{NewUser, SessionRecord, User};
use std::future::Future;

/// Key layout shared by the cache-backed stores.
pub mod keys {
    /// Prefix for session entries, followed by the token.
    pub const SESSION_PREFIX: &str = "session:";

    pub fn session(token: &str) -> String {
        format!("{SESSION_PREFIX}{token}")
    }
}

/// Durable user records, unique by external ID.
pub trait UserRepository: Send + Sync + 'static {
    /// Look up the user registered for a platform ID.
    fn find_user_by_external_id(
        &self,
        external_id: i64,
    ) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    /// Insert a new user. Fails with `StoreError::Conflict` if the external
    /// ID is already taken.
    fn create_user(&self, user: NewUser) -> impl Future<Output = StoreResult<User>> + Send;
}

/// TTL-bound session cache keyed by session token.
pub trait SessionStore: Send + Sync + 'static {
    /// Write the full record, replacing anything stored under `token`.
    fn set_session(
        &self,
        token: &str,
        record: &SessionRecord,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Refresh the expiry of an existing entry.
    fn touch_session(&self, token: &str) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Write side of the leaderboard cache.
pub trait LeaderboardStore: Send + Sync + 'static {
    fn set_user_data(
        &self,
        user_id: &str,
        display_name: &str,
    ) -> impl Future<Output = StoreResult<()>> + Send;
}
