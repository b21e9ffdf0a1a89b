// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle: create, touch, expire-and-recreate.

use crate::db::SessionStore;
use crate::error::AuthError;
use crate::models::{Session, User};
use chrono::{TimeDelta, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;
use std::time::Duration;

/// Session tokens carry 128 bits of randomness.
const TOKEN_BYTES: usize = 16;

/// Owns the session slot of each request against a TTL-backed store.
pub struct SessionManager<C> {
    store: Arc<C>,
    ttl: TimeDelta,
    rng: SystemRandom,
}

impl<C> Clone for SessionManager<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            ttl: self.ttl,
            rng: self.rng.clone(),
        }
    }
}

impl<C: SessionStore> SessionManager<C> {
    pub fn new(store: Arc<C>, ttl: Duration) -> Self {
        Self {
            store,
            ttl: TimeDelta::from_std(ttl).unwrap_or_else(|_| TimeDelta::MAX),
            rng: SystemRandom::new(),
        }
    }

    /// Touch `current` if it is still live, otherwise issue a new session.
    ///
    /// A live session comes back with the same token and only its
    /// last-activity moved. An expired one is never revived.
    pub async fn resolve(&self, user: &User, current: Option<Session>) -> Result<Session, AuthError> {
        let now = Utc::now();

        match current {
            Some(mut session) if !session.is_expired_at(now) => {
                session.touch_at(now);
                self.store.touch_session(session.token()).await?;
                tracing::trace!(user_id = %session.user_id, "Touched session");
                Ok(session)
            }
            previous => {
                if let Some(expired) = previous {
                    tracing::debug!(
                        user_id = %expired.user_id,
                        expired_at = %expired.expires_at(),
                        "Session expired, issuing a new one"
                    );
                }

                let session = Session::new(generate_token(&self.rng)?, user, self.ttl, now);
                self.store
                    .set_session(session.token(), &session.to_record())
                    .await?;
                tracing::debug!(
                    user_id = %session.user_id,
                    external_id = session.external_id,
                    "Created session"
                );
                Ok(session)
            }
        }
    }
}

fn generate_token(rng: &SystemRandom) -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    rng.fill(&mut bytes).map_err(|_| AuthError::TokenGeneration)?;
    Ok(hex::encode(bytes))
}
