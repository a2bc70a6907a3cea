//! # Catalog REST API Module
//!
//! HTTP endpoints for browsing, searching, filtering and deleting cars.

pub mod errors;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use parser::{PageParams, DEFAULT_PAGE_SIZE};
pub use response::{filter_example, DeleteResponse, FilterResponse, SingleResponse};
pub use server::RestServer;
