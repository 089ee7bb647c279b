//! # Cities HTTP Server Module
//!
//! Combines the health and city routers into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/cities` - List and create cities
//! - `/cities/:name` - Update and delete a city

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use health_routes::HealthResponse;
pub use server::HttpServer;
