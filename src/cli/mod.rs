//! CLI module for evcatalog
//!
//! - init: create the cars table
//! - seed: import the CSV dataset
//! - serve: run the HTTP API

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, seed, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
