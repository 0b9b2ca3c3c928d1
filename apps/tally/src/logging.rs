//! # Logging Setup
//!
//! Installs the global `tracing` subscriber. Output goes to stderr so that
//! stdout carries only command results.

use crate::config::{DEFAULT_LOG_FILTER, LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the config file.
fn build_filter(config: &LogConfig, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if verbose {
        return EnvFilter::new("tally=debug,tally_core=debug,tower_http=debug");
    }
    EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initialize tracing. Safe to call once per process.
pub fn init(config: &LogConfig, verbose: bool) {
    let filter = build_filter(config, verbose);

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
