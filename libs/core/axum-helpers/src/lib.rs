//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service crates.
//!
//! - **[`errors`]**: the JSON error envelope, [`ErrorCode`] and [`AppError`]
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: router assembly with API docs, `/health`, graceful shutdown
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, cors::CorsConfig, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes, &CorsConfig::AnyOrigin)?
//!     .merge(health_router(app_info!()));
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(10), async {}).await?;
//! ```

pub mod errors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use http::{create_cors_layer, security_headers};
pub use server::{
    HealthResponse, create_production_app, create_router, health_router, shutdown_signal,
};
