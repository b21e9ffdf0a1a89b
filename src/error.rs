// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types shared by the stores and the auth middleware.
//!
//! Store failures are never translated: whatever a store port returns is
//! what the caller of the pipeline sees.

use tower::BoxError;

/// Failure reported by one of the external stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store operation timed out")]
    Timeout,

    #[error("Duplicate key: {0}")]
    Conflict(String),

    #[error("Malformed record: {0}")]
    Malformed(String),
}

/// Failure while authenticating an update.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to generate session token")]
    TokenGeneration,
}

impl AuthError {
    /// Box the error for the middleware chain.
    ///
    /// Store failures are boxed as the original `StoreError` so callers can
    /// downcast to it directly.
    pub fn into_boxed(self) -> BoxError {
        match self {
            AuthError::Store(err) => Box::new(err),
            other => Box::new(other),
        }
    }
}

/// Result type alias for store ports.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
