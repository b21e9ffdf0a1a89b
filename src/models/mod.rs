// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the gateway.

pub mod context;
pub mod identity;
pub mod session;
pub mod user;

pub use context::UpdateContext;
pub use identity::{Chat, ChatKind, Identity, Update};
pub use session::{Session, SessionRecord};
pub use user::{NewUser, User};
