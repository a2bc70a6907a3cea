//! # HTTP Server Module
//!
//! # Endpoints
//!
//! - `/health` - Health check including a store probe
//! - `/api/cars*` - Catalog listing, search, filter, lookup and delete
//! - `/api/metadata` - Filterable column descriptions

pub mod config;
pub mod health;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
