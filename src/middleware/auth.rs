// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication middleware.
//!
//! For every eligible update: resolve the user, resolve the session, publish
//! the leaderboard name, then hand the enriched context to the next stage.
//! Any failure on the way aborts the update before the next stage runs.

use super::gate;
use crate::db::{LeaderboardStore, SessionStore, UserRepository};
use crate::error::AuthError;
use crate::models::UpdateContext;
use crate::services::{LeaderboardPublisher, SessionManager, UserResolver};
use futures_util::future::BoxFuture;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tower::{BoxError, Layer, Service};

/// The per-update auth steps, shared by every clone of the middleware.
pub struct Authenticator<U, C, L> {
    users: UserResolver<U>,
    sessions: SessionManager<C>,
    leaderboard: LeaderboardPublisher<L>,
}

impl<U, C, L> Authenticator<U, C, L>
where
    U: UserRepository,
    C: SessionStore,
    L: LeaderboardStore,
{
    pub fn new(users: Arc<U>, sessions: Arc<C>, leaderboard: Arc<L>, session_ttl: Duration) -> Self {
        Self {
            users: UserResolver::new(users),
            sessions: SessionManager::new(sessions, session_ttl),
            leaderboard: LeaderboardPublisher::new(leaderboard),
        }
    }

    /// Attach the user and session for the update's sender.
    ///
    /// Ineligible updates come back untouched.
    pub async fn authenticate(&self, mut ctx: UpdateContext) -> Result<UpdateContext, AuthError> {
        let Some(identity) = gate::eligible_sender(&ctx).cloned() else {
            tracing::debug!(
                update_id = ctx.update.update_id,
                "No human sender, skipping auth"
            );
            return Ok(ctx);
        };

        let user = self.users.resolve(&identity, ctx.user.take()).await?;
        let session = self.sessions.resolve(&user, ctx.session.take()).await?;
        self.leaderboard.publish(&user).await?;

        ctx.user = Some(user);
        ctx.session = Some(session);
        Ok(ctx)
    }
}

/// Tower layer that runs [`Authenticator`] ahead of the wrapped service.
pub struct AuthLayer<U, C, L> {
    auth: Arc<Authenticator<U, C, L>>,
}

impl<U, C, L> AuthLayer<U, C, L>
where
    U: UserRepository,
    C: SessionStore,
    L: LeaderboardStore,
{
    pub fn new(users: Arc<U>, sessions: Arc<C>, leaderboard: Arc<L>, session_ttl: Duration) -> Self {
        Self::from_authenticator(Authenticator::new(users, sessions, leaderboard, session_ttl))
    }

    pub fn from_authenticator(auth: Authenticator<U, C, L>) -> Self {
        Self {
            auth: Arc::new(auth),
        }
    }
}

// Manual Clone: avoid derive adding `U: Clone, C: Clone, L: Clone` bounds.
impl<U, C, L> Clone for AuthLayer<U, C, L> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
        }
    }
}

impl<S, U, C, L> Layer<S> for AuthLayer<U, C, L> {
    type Service = AuthService<S, U, C, L>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            auth: self.auth.clone(),
        }
    }
}

/// Service produced by [`AuthLayer`].
///
/// Store failures reach the caller as the original `StoreError` boxed into
/// a [`BoxError`]; errors from the wrapped service are boxed as-is.
pub struct AuthService<S, U, C, L> {
    inner: S,
    auth: Arc<Authenticator<U, C, L>>,
}

impl<S: Clone, U, C, L> Clone for AuthService<S, U, C, L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl<S, U, C, L> Service<UpdateContext> for AuthService<S, U, C, L>
where
    S: Service<UpdateContext> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
    S::Error: Into<BoxError>,
    U: UserRepository,
    C: SessionStore,
    L: LeaderboardStore,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<S::Response, BoxError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, ctx: UpdateContext) -> Self::Future {
        // Take the service that was driven to readiness, leave a clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let auth = self.auth.clone();

        Box::pin(async move {
            let ctx = auth
                .authenticate(ctx)
                .await
                .map_err(AuthError::into_boxed)?;
            inner.call(ctx).await.map_err(Into::into)
        })
    }
}
