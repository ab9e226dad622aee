pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod market;
pub mod report;

pub use application::FinanceSession;
pub use domain::*;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber, writing to stderr.
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let level = if verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("finai={level}")));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
