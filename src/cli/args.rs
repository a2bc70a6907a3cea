//! CLI argument definitions using clap
//!
//! Commands:
//! - evcatalog init --config <path>
//! - evcatalog seed --config <path> [--csv <path>]
//! - evcatalog serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// evcatalog - electric-car catalog browser backend
#[derive(Parser, Debug)]
#[command(name = "evcatalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the cars table
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./evcatalog.json")]
        config: PathBuf,
    },

    /// Create the cars table if needed and upsert the CSV dataset
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./evcatalog.json")]
        config: PathBuf,

        /// Dataset to import (overrides csv_path from the config)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./evcatalog.json")]
        config: PathBuf,

        /// Port to listen on (overrides http.port from the config)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_with_csv_override() {
        let cli = Cli::try_parse_from(["evcatalog", "seed", "--csv", "cars.csv"]).unwrap();
        match cli.command {
            Command::Seed { config, csv } => {
                assert_eq!(config, PathBuf::from("./evcatalog.json"));
                assert_eq!(csv, Some(PathBuf::from("cars.csv")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::try_parse_from(["evcatalog", "serve", "--port", "8080"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { port: Some(8080), .. }));
    }
}
