//! CLI command implementations
//!
//! Each command loads the configuration, applies the log level, opens the
//! store and runs to completion on a fresh tokio runtime.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::observability::{Logger, ObservationScope};
use crate::store::CarStore;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Seed { config, csv } => seed(&config, csv),
        Command::Serve { config, port } => serve(&config, port),
    }
}

fn prepare(config_path: &Path) -> CliResult<(Config, CarStore)> {
    let config = Config::load_or_default(config_path)?;
    Logger::set_min_severity(config.severity()?);

    let store = CarStore::open(&config.database_path, config.pool_size)?;
    Ok((config, store))
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))
}

/// Create the cars table
pub fn init(config_path: &Path) -> CliResult<()> {
    let (config, store) = prepare(config_path)?;
    let database = config.database_path.display().to_string();
    let scope = ObservationScope::with_fields("SCHEMA_INIT", &[("database", database.as_str())]);

    match runtime()?.block_on(store.init_schema()) {
        Ok(()) => {
            scope.complete();
            Ok(())
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e.into())
        }
    }
}

/// Create the table if needed and import the dataset
pub fn seed(config_path: &Path, csv_override: Option<PathBuf>) -> CliResult<()> {
    let (config, store) = prepare(config_path)?;
    let csv_path = csv_override.unwrap_or_else(|| config.csv_path.clone());
    let csv_str = csv_path.display().to_string();
    let scope = ObservationScope::with_fields("SEED", &[("csv", csv_str.as_str())]);

    match runtime()?.block_on(store.seed_from_csv(csv_path)) {
        Ok(summary) => {
            let read = summary.read.to_string();
            let inserted = summary.inserted.to_string();
            let updated = summary.updated.to_string();
            let skipped = summary.skipped.to_string();
            let total = summary.total.to_string();
            scope.complete_with_fields(&[
                ("read", read.as_str()),
                ("inserted", inserted.as_str()),
                ("updated", updated.as_str()),
                ("skipped", skipped.as_str()),
                ("total", total.as_str()),
            ]);
            Ok(())
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e.into())
        }
    }
}

/// Serve the HTTP API until interrupted
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let (mut config, store) = prepare(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let runtime = runtime()?;
    runtime.block_on(async move {
        let store = Arc::new(store);
        if let Err(e) = store.ping().await {
            let error = e.to_string();
            Logger::warn("STORE_UNREACHABLE", &[("error", error.as_str())]);
        }

        let server = HttpServer::with_config(config.http, store);
        server
            .start()
            .await
            .map_err(|e| CliError::serve_error(e.to_string()))
    })
}
