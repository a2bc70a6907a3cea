//! Health check route

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::observability::Logger;
use crate::store::CarStore;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// `/health`, probing the store on every call
pub fn health_routes(store: Arc<CarStore>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(store)
}

async fn health_handler(State(store): State<Arc<CarStore>>) -> impl IntoResponse {
    let (status, code, database) = match store.ping().await {
        Ok(()) => ("ok", StatusCode::OK, "ok"),
        Err(e) => {
            let error = e.to_string();
            Logger::warn("HEALTH_CHECK_FAILED", &[("error", error.as_str())]);
            ("degraded", StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    };

    (code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok",
            version: "0.1.0",
            database: "ok",
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "ok");
    }
}
