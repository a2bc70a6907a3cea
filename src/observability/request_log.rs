//! Per-request correlation id and access logging

use std::time::Instant;

use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::logger::{Logger, Severity};

/// Header carrying the correlation id in both directions
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reuse the caller's `x-request-id` or mint one, log the outcome, and echo
/// the id on the response
pub async fn log_requests(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| RequestId(s.to_string()))
        .unwrap_or_else(RequestId::generate);

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(request_id.clone());

    let started = Instant::now();
    let mut response = next.run(request).await;
    let status = response.status();

    let severity = if status.is_server_error() {
        Severity::Error
    } else {
        Severity::Info
    };
    let status_str = status.as_u16().to_string();
    let duration_ms = started.elapsed().as_millis().to_string();
    Logger::log(
        severity,
        "HTTP_REQUEST",
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("status", status_str.as_str()),
            ("duration_ms", duration_ms.as_str()),
            ("request_id", request_id.as_str()),
        ],
    );

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }
}
