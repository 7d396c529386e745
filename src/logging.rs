//! Tracing setup for the command-line tool.
//!
//! Logs go to stderr so that digests on stdout stay machine-readable.

use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbosity` when set.
///
/// Subsequent calls are ignored.
pub fn init_tracing(verbosity: u8, json: bool) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

        let registry = tracing_subscriber::registry().with(env_filter);
        if json {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
                .init();
        } else {
            registry
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .init();
        }
    });
}
