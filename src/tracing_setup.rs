// File: src/tracing_setup.rs
//! Logging initialization.

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "MISPAR_LOG";

static INIT: Once = Once::new();

/// Installs a `fmt` subscriber filtered by `MISPAR_LOG`
/// (e.g. `MISPAR_LOG=mispar_core=debug`), falling back to `default_filter`.
/// Only the first call has any effect.
pub fn init_tracing(default_filter: &str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
