//! Tracing subscriber setup.
//!
//! Logs go to stderr so the menu and action output on stdout stay readable.

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fallback filter when none is given or the given one does not parse
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber once
///
/// `RUST_LOG` takes precedence over `filter`. Later calls are no-ops.
pub fn init_tracing(filter: &str) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(true)
            .compact()
            .with_writer(std::io::stderr);

        let filter_layer = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed, e.g. by a test harness
        let _: Result<(), _> = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing("debug");
        init_tracing("not a valid filter [");
        tracing::debug!("still running");
    }
}
