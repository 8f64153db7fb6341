//! Tracing subscriber setup.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "SQLBRIDGE_LOG";

static INIT: Once = Once::new();

/// Install a fmt subscriber filtered by `SQLBRIDGE_LOG`, falling back to
/// `default_filter` and then to `info`. Safe to call more than once; only
/// the first call has any effect, and an already-installed global
/// subscriber is left alone.
pub fn init_tracing(default_filter: Option<&str>) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_filter.unwrap_or("info")));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_thread_names(true)
            .try_init();
    });
}
