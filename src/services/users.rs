// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Find-or-create of durable user records.

use crate::db::UserRepository;
use crate::error::StoreResult;
use crate::models::{Identity, NewUser, User};
use std::sync::Arc;

/// Resolves the durable user behind an inbound identity.
pub struct UserResolver<R> {
    repo: Arc<R>,
}

impl<R> Clone for UserResolver<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: UserRepository> UserResolver<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Return the user for `identity`, creating it on first sight.
    ///
    /// An already-attached user is returned as-is without touching the
    /// store. Store errors are returned unchanged; a lost creation race
    /// surfaces as whatever the store reports for the duplicate.
    pub async fn resolve(&self, identity: &Identity, attached: Option<User>) -> StoreResult<User> {
        if let Some(user) = attached {
            return Ok(user);
        }

        if let Some(user) = self.repo.find_user_by_external_id(identity.id).await? {
            return Ok(user);
        }

        let user = self.repo.create_user(NewUser::from(identity)).await?;
        tracing::info!(
            user_id = %user.id,
            external_id = user.external_id,
            username = ?user.username,
            "Created user"
        );
        Ok(user)
    }
}
