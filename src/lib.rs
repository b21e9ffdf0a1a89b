// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Botgate: inbound auth middleware for a chat-bot gateway
//!
//! Every update from the messaging platform passes through
//! [`middleware::InstrumentLayer`] and [`middleware::AuthLayer`] before it
//! reaches the bot's handler. Authentication resolves the durable user for
//! the sender, keeps a time-bounded session alive, and publishes the
//! sender's leaderboard name. The stores behind it are injected through the
//! ports in [`db`].

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod time_utils;

pub use error::{AuthError, StoreError};
pub use middleware::{pipeline, AuthLayer, InstrumentLayer};
pub use models::{Identity, Session, Update, UpdateContext, User};
