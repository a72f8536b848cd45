//! Logging setup
//!
//! Tracing subscriber with env-filter. `RUST_LOG` overrides the default
//! filter; the `security` target carries auth events.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "dineease_server=debug,tower_http=info,surrealdb=warn";

/// Initialise the global tracing subscriber.
///
/// Safe to call once per process; subsequent calls are no-ops.
pub fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
