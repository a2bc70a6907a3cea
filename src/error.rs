//! Catalog Error Types
//!
//! Errors returned by the filter compiler and the record access layer.
//! "Not found" is not an error here: lookups return `Option` and deletes
//! return `bool`.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog operation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Bad input shape or range, detected before the store is touched
    #[error("{0}")]
    Validation(String),

    /// Unknown operator, unknown field or unusable filter value
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Connectivity or query failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_filter(msg: impl Into<String>) -> Self {
        Self::InvalidFilter(msg.into())
    }
}
