//! # tally
//!
//! The Tally application: CLI commands and the HTTP JSON API over the
//! reductions in `tally-core`.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
