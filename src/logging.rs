//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "BINGWALL_LOG";

fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

/// Log to stderr, filtered by `BINGWALL_LOG` (e.g. `bingwall_infra=debug`).
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
