//! Tracing setup.
//!
//! Console logging with `RUST_LOG` filtering (default: `info`).

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Call once from `main` before anything logs.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}
