// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logging initialization.

use crate::config::{Config, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// JSON output is flattened and carries the current span, so fields bound
/// on the per-update span show up on every event logged inside it.
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.log_filter)?;

    match config.log_format {
        LogFormat::Json => {
            let format = tracing_subscriber::fmt::layer()
                .json()
                .with_target(false)
                .with_current_span(true)
                .flatten_event(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(format)
                .try_init()?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .try_init()?;
        }
    }

    Ok(())
}
