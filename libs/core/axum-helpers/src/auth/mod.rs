//! Token issuance.
//!
//! Access tokens are HS256 JWTs signed with `JWT_SECRET`. The verifying
//! side is exposed for tests and downstream services; this workspace does
//! not ship a verification middleware.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, JwtIssuer};
//! use core_config::FromEnv;
//!
//! let config = JwtConfig::from_env()?;
//! let issuer = JwtIssuer::new(&config);
//! let token = issuer.issue("665f1c2e9b1d4a0012345678")?;
//! ```

pub mod config;
pub mod jwt;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, JwtClaims, JwtError, JwtIssuer};
