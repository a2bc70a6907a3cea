//! evcatalog - backend for a browsable electric-car catalog
//!
//! A single SQLite table of cars, a JSON filter compiler, a CSV seeder and
//! an HTTP API for paging, searching, filtering, reading and deleting cars.

pub mod catalog;
pub mod cli;
pub mod error;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod rest_api;
pub mod store;

pub use catalog::{Car, CarField};
pub use error::{CatalogError, CatalogResult};
pub use store::{CarPage, CarStore};
