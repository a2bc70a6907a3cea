//! # Store Errors
//!
//! Failures talking to SQLite or reading the seed dataset.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The pool could not be built from configuration
    #[error("Failed to create connection pool: {0}")]
    PoolCreate(String),

    /// No connection could be checked out
    #[error("Failed to acquire connection: {0}")]
    Checkout(String),

    /// The blocking task running the statement panicked or was aborted
    #[error("Connection task failed: {0}")]
    Interact(String),

    /// Statement preparation or execution failed
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Seed dataset could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed dataset could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Seed dataset is missing
    #[error("Dataset not found at {}", .0.display())]
    DatasetNotFound(PathBuf),
}
