//! Observability for evcatalog
//!
//! - Structured one-line JSON logging ([`Logger`])
//! - BEGIN/COMPLETE scopes for multi-step work ([`ObservationScope`])
//! - Access logging with request correlation ids ([`log_requests`])
//!
//! ```ignore
//! use evcatalog::observability::Logger;
//!
//! Logger::info("SERVER_LISTENING", &[("addr", "0.0.0.0:3001")]);
//! ```

mod logger;
mod request_log;
mod scope;

pub use logger::{Logger, Severity};
pub use request_log::{log_requests, RequestId, X_REQUEST_ID};
pub use scope::ObservationScope;
