//! # Tally
//!
//! The main binary for the Tally aggregator.
//!
//! ## Usage
//!
//! ```bash
//! # One-off reductions
//! tally average --values 1,2,3,4,5
//! tally count -f cart.json
//! tally remove -f cart.json --id 2 -o cart.new.json
//! tally mse --actual 1,2,3 --predicted 1,2,5
//!
//! # Start the HTTP server
//! tally server --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use tally::{cli, config::TallyConfig, logging};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Logging is not up yet, so configuration errors go straight to stderr.
    let config = match TallyConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    logging::init(&config.log, cli.verbose);
    tracing::debug!(config = ?config.log, "logging initialized");

    if let Err(e) = cli::execute(cli, config).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
