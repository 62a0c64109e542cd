//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize stderr logging.
///
/// `RUST_LOG` takes precedence; otherwise `warn`, or `debug` when `verbose`.
/// Standard output is left to the report.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let default_level = if verbose { "live_probe=debug,live_probe_cli=debug,info" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(verbose),
            )
            .init();

        tracing::debug!(service.name = env!("CARGO_PKG_NAME"), "Logging initialized");
    });
}
