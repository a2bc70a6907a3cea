//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed to stderr and the process exits
//! non-zero.

use std::fmt;
use std::io;

use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O or runtime setup error
    IoError,
    /// Database or dataset error
    StoreError,
    /// HTTP server failed to start or stopped with an error
    ServeError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "EVC_CLI_CONFIG_ERROR",
            Self::IoError => "EVC_CLI_IO_ERROR",
            Self::StoreError => "EVC_CLI_STORE_ERROR",
            Self::ServeError => "EVC_CLI_SERVE_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn serve_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeError, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(CliErrorCode::StoreError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("pool_size must be > 0");
        assert_eq!(err.to_string(), "EVC_CLI_CONFIG_ERROR: pool_size must be > 0");
    }

    #[test]
    fn test_store_error_conversion() {
        let err = CliError::from(StoreError::DatasetNotFound(PathBuf::from("cars.csv")));
        assert_eq!(err.code(), &CliErrorCode::StoreError);
        assert!(err.message().contains("cars.csv"));
    }
}
