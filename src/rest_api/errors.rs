//! # REST API Errors
//!
//! Error types for the REST API module and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::CatalogError;
use crate::observability::Logger;

use super::response::filter_example;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// Body returned for every 5xx; details only go to the log
const OPAQUE_INTERNAL: &str = "Internal server error";

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Bad parameter shape or range
    #[error("{0}")]
    Validation(String),

    /// Unknown operator, unknown field or unusable filter value
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Filter request body did not have the expected shape
    #[error("{0}")]
    InvalidBody(String),

    /// Requested row does not exist
    #[error("{0}")]
    NotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure; the message is logged, never returned
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for RestError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => RestError::Validation(msg),
            CatalogError::InvalidFilter(msg) => RestError::InvalidFilter(msg),
            CatalogError::Store(e) => RestError::Internal(e.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        let code = err.status_code().as_u16();
        match &err {
            RestError::Internal(_) => Self {
                error: OPAQUE_INTERNAL.to_string(),
                code,
                example: None,
            },
            RestError::InvalidBody(_) => Self {
                error: err.to_string(),
                code,
                example: Some(filter_example()),
            },
            _ => Self {
                error: err.to_string(),
                code,
                example: None,
            },
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::Internal(detail) = &self {
            Logger::error("STORE_ERROR", &[("error", detail.as_str())]);
        }
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
