//! Logging setup for the binaries.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber. The filter comes from `RUST_LOG`
/// and defaults to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
