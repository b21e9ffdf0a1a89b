// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (authentication, instrumentation).

pub mod auth;
pub mod gate;
pub mod instrument;

pub use auth::{AuthLayer, AuthService, Authenticator};
pub use gate::should_authenticate;
pub use instrument::{InstrumentLayer, InstrumentService};

use tower::ServiceBuilder;

/// Wrap `handler` with instrumentation (outermost) and authentication.
pub fn pipeline<S, U, C, L>(
    auth: AuthLayer<U, C, L>,
    handler: S,
) -> InstrumentService<AuthService<S, U, C, L>> {
    ServiceBuilder::new()
        .layer(InstrumentLayer)
        .layer(auth)
        .service(handler)
}
