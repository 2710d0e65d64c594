//! Logging setup
//!
//! The library only emits `tracing` events. Applications that want them
//! printed call one of these once at startup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize logging at INFO, overridable with `RUST_LOG`
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with `default_level` unless `RUST_LOG` is set
///
/// Does nothing if a global subscriber is already installed.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// Initialize logging from the `[logging]` section of the configuration
pub fn init_from_config(config: &LoggingConfig) {
    init_with_level(&config.level)
}

/// Initialize logging for tests (captured per test)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
