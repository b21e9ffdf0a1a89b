// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store implementations backed by `DashMap`.
//!
//! Each map operation is atomic per key, which is all the auth middleware
//! relies on: user creation goes through the entry API so only one insert
//! per external ID can win.

use super::{keys, LeaderboardStore, SessionStore, UserRepository};
use crate::error::{StoreError, StoreResult};
use crate::models::{NewUser, SessionRecord, User};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// User records keyed by external ID.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: DashMap<i64, User>,
    next_id: AtomicU64,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed user, e.g. to seed fixtures.
    pub fn insert(&self, user: User) {
        self.users.insert(user.external_id, user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn find_user_by_external_id(&self, external_id: i64) -> StoreResult<Option<User>> {
        Ok(self.users.get(&external_id).map(|user| user.value().clone()))
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        match self.users.entry(user.external_id) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "user with external_id {} already exists",
                user.external_id
            ))),
            Entry::Vacant(slot) => {
                let seq = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                let created = user.into_user(format!("user-{seq}"), chrono::Utc::now());
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }
}

struct CachedSession {
    record: SessionRecord,
    expires_at: Instant,
}

/// Session cache with per-entry expiry.
pub struct MemorySessionStore {
    entries: DashMap<String, CachedSession>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Look up a live session by token. A lapsed hit is evicted.
    pub fn get_session(&self, token: &str) -> Option<SessionRecord> {
        let key = keys::session(token);
        let now = Instant::now();
        if self
            .entries
            .remove_if(&key, |_, entry| entry.expires_at <= now)
            .is_some()
        {
            return None;
        }
        self.entries
            .get(&key)
            .map(|entry| entry.value().record.clone())
    }

    /// Drop every entry whose TTL has run out.
    fn evict_lapsed(&self, now: Instant) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let evicted = before.saturating_sub(self.entries.len());
        if evicted > 0 {
            tracing::trace!(evicted, "Evicted lapsed sessions");
        }
    }

    /// Number of entries, including lapsed ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    async fn set_session(&self, token: &str, record: &SessionRecord) -> StoreResult<()> {
        let now = Instant::now();
        self.evict_lapsed(now);
        self.entries.insert(
            keys::session(token),
            CachedSession {
                record: record.clone(),
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    async fn touch_session(&self, token: &str) -> StoreResult<()> {
        let key = keys::session(token);
        let now = Instant::now();

        // A lapsed entry is dropped rather than revived.
        let removed = self
            .entries
            .remove_if(&key, |_, entry| entry.expires_at <= now)
            .is_some();
        if removed {
            tracing::debug!("Touched session had already lapsed in cache");
            return Ok(());
        }

        if let Some(mut entry) = self.entries.get_mut(&key) {
            entry.expires_at = now + self.ttl;
        }
        Ok(())
    }
}

/// Leaderboard display names keyed by user ID.
#[derive(Default)]
pub struct MemoryLeaderboard {
    names: DashMap<String, String>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_name(&self, user_id: &str) -> Option<String> {
        self.names.get(user_id).map(|name| name.value().clone())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    async fn set_user_data(&self, user_id: &str, display_name: &str) -> StoreResult<()> {
        self.names.insert(user_id.to_string(), display_name.to_string());
        Ok(())
    }
}
