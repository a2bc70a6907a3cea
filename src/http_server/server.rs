//! # HTTP Server
//!
//! Combines the catalog REST router with the health route, CORS and
//! access logging.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_requests, Logger};
use crate::rest_api::RestServer;
use crate::store::CarStore;

use super::config::HttpServerConfig;
use super::health::health_routes;

/// HTTP server for the catalog API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with the default configuration
    pub fn new(store: Arc<CarStore>) -> Self {
        Self::with_config(HttpServerConfig::default(), store)
    }

    pub fn with_config(config: HttpServerConfig, store: Arc<CarStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, store: Arc<CarStore>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes(store.clone()))
            .nest("/api", RestServer::new(store).router())
            .layer(middleware::from_fn(log_requests))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let addr_str = addr.to_string();
        Logger::info("SERVER_LISTENING", &[("addr", addr_str.as_str())]);

        axum::serve(listener, self.router).await
    }
}
