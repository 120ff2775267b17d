//! Tracing/logging initialization.
//!
//! JSON logs with an env-filter; the store layer emits `warn!` for dropped
//! rows and `debug!` for cache traffic, so `RUST_LOG=rxstock_store=debug`
//! is the useful knob when chasing invalidation bugs.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
