//! # Tally CLI Module
//!
//! This module implements the CLI interface for Tally.
//!
//! ## Available Commands
//!
//! - `average` - Mean of inline or file-provided numbers
//! - `count` - Weighted count of a cart file
//! - `remove` - Cart file without the items carrying an id
//! - `mse` - Mean squared error of two sequences
//! - `user` - Normalised user record
//! - `server` - Start the HTTP server

mod commands;

use crate::config::TallyConfig;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tally_core::{AverageMethod, TallyError};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Tally - pure reductions over numbers and carts
///
/// Averages, weighted counts, stable removal and mean squared error,
/// from the command line or over HTTP.
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "tally.toml")]
    pub config: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Arithmetic mean of a sequence of numbers
    Average {
        /// Comma-separated numbers, e.g. "1,2.5,-3"
        #[arg(long, allow_hyphen_values = true, conflicts_with = "file")]
        values: Option<String>,

        /// JSON file holding an array of numbers
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Accumulation method (loop, fold)
        #[arg(short, long, default_value = "loop")]
        method: AverageMethod,
    },

    /// Sum of the quantities in a cart
    Count {
        /// JSON file holding an array of cart items
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Remove every cart item carrying an id
    Remove {
        /// JSON file holding an array of cart items
        #[arg(short, long)]
        file: PathBuf,

        /// Item id to remove
        #[arg(long)]
        id: u64,

        /// Write the remaining items here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mean squared error between actual and predicted values
    Mse {
        /// Comma-separated actual values
        #[arg(long, allow_hyphen_values = true, requires = "predicted", conflicts_with = "file")]
        actual: Option<String>,

        /// Comma-separated predicted values
        #[arg(long, allow_hyphen_values = true, requires = "actual")]
        predicted: Option<String>,

        /// JSON file holding {"actual": [...], "predicted": [...]}
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Build a user record with trimmed names
    User {
        /// First name
        #[arg(long, allow_hyphen_values = true)]
        first: String,

        /// Last name
        #[arg(long, allow_hyphen_values = true)]
        last: String,
    },

    /// Start HTTP server
    Server {
        /// Host to bind to (overrides the config file)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and loaded configuration.
pub async fn execute(cli: Cli, config: TallyConfig) -> Result<(), TallyError> {
    let json_mode = cli.json_mode;

    let output = match cli.command {
        Some(Commands::Average {
            values,
            file,
            method,
        }) => cmd_average(values.as_deref(), file.as_deref(), method, json_mode)?,
        Some(Commands::Count { file }) => cmd_count(&file, json_mode)?,
        Some(Commands::Remove { file, id, output }) => {
            cmd_remove(&file, id, output.as_deref(), json_mode)?
        }
        Some(Commands::Mse {
            actual,
            predicted,
            file,
        }) => cmd_mse(
            actual.as_deref(),
            predicted.as_deref(),
            file.as_deref(),
            json_mode,
        )?,
        Some(Commands::User { first, last }) => cmd_user(&first, &last, json_mode)?,
        Some(Commands::Server { host, port }) => {
            let mut server = config.server;
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            return cmd_server(server, cli.quiet).await;
        }
        None => Cli::command().render_help().to_string(),
    };

    println!("{}", output);
    Ok(())
}
