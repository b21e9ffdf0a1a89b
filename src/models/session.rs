// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session model and its persisted record.

use super::User;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// A time-bounded session bound to one user.
///
/// The token never changes after issue; `touch_at` only moves `last_activity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    pub user_id: String,
    pub external_id: i64,
    /// Username at session creation
    pub username: Option<String>,
    pub click_count: u64,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    ttl: TimeDelta,
}

impl Session {
    /// Start a fresh session for `user` under `token`.
    pub fn new(token: String, user: &User, ttl: TimeDelta, now: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id: user.id.clone(),
            external_id: user.external_id,
            username: user.username.clone(),
            click_count: 0,
            created_at: now,
            last_activity: now,
            ttl,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// When the session lapses unless touched again.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.last_activity
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the session has lapsed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Record activity at `now`.
    pub fn touch_at(&mut self, now: DateTime<Utc>) {
        if now > self.last_activity {
            self.last_activity = now;
        }
    }

    /// Full record written to the session store.
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            user_id: self.user_id.clone(),
            external_id: self.external_id.to_string(),
            username: self.username.clone(),
            click_count: self.click_count,
            created_at: format_utc_rfc3339(self.created_at),
            last_activity: format_utc_rfc3339(self.last_activity),
        }
    }
}

/// Session as persisted in the TTL cache, keyed by token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: String,
    /// Kept as text so 64-bit IDs survive JSON consumers
    pub external_id: String,
    pub username: Option<String>,
    pub click_count: u64,
    pub created_at: String,
    pub last_activity: String,
}
