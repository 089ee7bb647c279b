//! # HTTP Server
//!
//! Main HTTP server combining the health and city routers behind CORS,
//! request tracing and a per-request timeout.

use std::sync::Arc;

use axum::{error_handling::HandleErrorLayer, BoxError, Router};
use tokio::net::TcpListener;
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::observability::Event;
use crate::rest_api::{RestError, RestServer};
use crate::store::CityStore;

use super::config::HttpServerConfig;
use super::health_routes::health_routes;

/// HTTP Server for the cities API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over `store`
    pub fn new<S: CityStore + 'static>(config: HttpServerConfig, store: Arc<S>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router<S: CityStore + 'static>(config: &HttpServerConfig, store: Arc<S>) -> Router {
        // Configure CORS from config
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
            .merge(health_routes(Arc::clone(&store)))
            .merge(RestServer::new(store).router())
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(handle_middleware_error))
                    .layer(TimeoutLayer::new(config.request_timeout())),
            )
            .layer(TraceLayer::new_for_http())
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

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(
            event = Event::ServerStart.as_str(),
            addr = %addr,
            timeout_ms = self.config.request_timeout_ms,
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!(event = Event::Shutdown.as_str());
        Ok(())
    }
}

/// Map middleware failures onto the JSON error body
async fn handle_middleware_error(err: BoxError) -> RestError {
    if err.is::<Elapsed>() {
        RestError::Timeout
    } else {
        RestError::Internal(err.to_string())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteCityStore;

    fn memory_store() -> Arc<SqliteCityStore> {
        Arc::new(SqliteCityStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(HttpServerConfig::default(), memory_store());
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::new(config, memory_store());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_with_cors_origins_builds() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::new(config, memory_store()).router();
    }
}
