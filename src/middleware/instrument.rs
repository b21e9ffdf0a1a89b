// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request timing and structured start/completion events.

use crate::models::UpdateContext;
use crate::time_utils::rounded_millis;
use futures_util::future::BoxFuture;
use std::task::{Context, Poll};
use tokio::time::Instant;
use tower::{Layer, Service};
use tracing::Instrument;

/// Rendered in place of fields the update does not carry.
pub const ABSENT: &str = "none";

/// Tower layer that logs the start and completion of every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstrumentLayer;

impl<S> Layer<S> for InstrumentLayer {
    type Service = InstrumentService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InstrumentService { inner }
    }
}

/// Service produced by [`InstrumentLayer`].
///
/// The wrapped service's result is returned unchanged; a failure is only
/// annotated with `success = false` on the completion event.
#[derive(Debug, Clone)]
pub struct InstrumentService<S> {
    inner: S,
}

impl<S> Service<UpdateContext> for InstrumentService<S>
where
    S: Service<UpdateContext> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<S::Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, ctx: UpdateContext) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let external_id = ctx
            .sender()
            .map(|sender| sender.id.to_string())
            .unwrap_or_else(|| ABSENT.to_string());
        let username = ctx
            .sender()
            .and_then(|sender| sender.username.clone())
            .unwrap_or_else(|| ABSENT.to_string());
        let chat_type = ctx.update.chat_kind().map_or(ABSENT, |kind| kind.as_str());
        let span = tracing::info_span!("update", update_id = ctx.update.update_id);

        Box::pin(
            async move {
                let start = Instant::now();
                tracing::info!(
                    external_id = %external_id,
                    username = %username,
                    chat_type,
                    "Update started"
                );

                let result = inner.call(ctx).await;

                tracing::info!(
                    external_id = %external_id,
                    duration_ms = rounded_millis(start.elapsed()),
                    success = result.is_ok(),
                    "Update completed"
                );
                result
            }
            .instrument(span),
        )
    }
}
