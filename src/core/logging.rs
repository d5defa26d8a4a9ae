//! Tracing/logging initialization
//!
//! Diagnostics go to stderr so stdout stays a clean report stream.

use tracing_subscriber::EnvFilter;

/// Filter used when nothing else is configured
pub const DEFAULT_FILTER: &str = "error";

/// Pick the filter directive: `INVENTORY_LOG`, then `RUST_LOG`, then the
/// configured value, then `fallback`
pub fn filter_directive(configured: Option<&str>, fallback: &str) -> String {
    std::env::var("INVENTORY_LOG")
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| fallback.to_string())
}

/// Initialize tracing for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
