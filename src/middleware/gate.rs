//! Decides whether an update is eligible for authentication.

use crate::models::{Identity, UpdateContext};

/// The sender to authenticate, if any.
///
/// Updates without a sender, or sent by a bot account, are passed through
/// unauthenticated.
pub fn eligible_sender(ctx: &UpdateContext) -> Option<&Identity> {
    ctx.sender().filter(|sender| !sender.is_bot)
}

pub fn should_authenticate(ctx: &UpdateContext) -> bool {
    eligible_sender(ctx).is_some()
}
