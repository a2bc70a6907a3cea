//! Configuration file structure
//!
//! ```json
//! {
//!   "database_path": "./evcatalog.db",
//!   "csv_path": "./data/electric_cars.csv",
//!   "pool_size": 8,
//!   "log_level": "info",
//!   "http": { "host": "0.0.0.0", "port": 3001, "cors_origins": [] }
//! }
//! ```
//!
//! Every field has a default, so `{}` is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::{Logger, Severity};

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Dataset imported by `seed`
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,

    /// Maximum pooled connections (must be > 0)
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./evcatalog.db")
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("./data/electric_cars.csv")
}

fn default_pool_size() -> usize {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            csv_path: default_csv_path(),
            pool_size: default_pool_size(),
            log_level: default_log_level(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Load from `path`, or use the defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let path_str = path.display().to_string();
        Logger::warn(
            "CONFIG_DEFAULTED",
            &[("path", path_str.as_str()), ("reason", "file not found")],
        );
        Ok(Self::default())
    }

    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.pool_size == 0 {
            return Err(CliError::config_error("pool_size must be > 0"));
        }

        self.severity()?;

        if self.database_path.as_os_str().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.http.port, 3001);
        assert_eq!(config.pool_size, 8);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_json(
            r#"{"database_path": "/tmp/cars.db", "pool_size": 2, "http": {"port": 9000}}"#,
        )
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/cars.db"));
        assert_eq!(config.pool_size, 2);
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.host, "0.0.0.0");
    }

    #[test]
    fn test_validation_failures() {
        assert!(Config::from_json(r#"{"pool_size": 0}"#).is_err());
        assert!(Config::from_json(r#"{"log_level": "chatty"}"#).is_err());
        assert!(Config::from_json("not json").is_err());
    }

    #[test]
    fn test_load_or_default() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.json");
        assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());

        let present = tmp.path().join("evcatalog.json");
        fs::write(&present, r#"{"pool_size": 3}"#).unwrap();
        assert_eq!(Config::load_or_default(&present).unwrap().pool_size, 3);
    }
}
