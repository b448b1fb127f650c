//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the `{ code, msg, [token | error] }` response wrapper
//! - **[`errors`]**: `AppError` and envelope-shaped fallbacks
//! - **[`extractors`]**: JSON object body extractor
//! - **[`auth`]**: HS256 JWT issuance
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{Environment, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config, &Environment::from_env())?;
//!     create_production_app(router, &config, std::time::Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod auth;
pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{JwtClaims, JwtConfig, JwtError, JwtIssuer};
pub use envelope::Envelope;
pub use errors::{AppError, ErrorCode};
pub use extractors::JsonObject;
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};
