// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the steps the auth middleware runs per update.

pub mod leaderboard;
pub mod sessions;
pub mod users;

pub use leaderboard::{display_name, LeaderboardPublisher};
pub use sessions::SessionManager;
pub use users::UserResolver;
