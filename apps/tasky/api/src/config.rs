use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_users::{JwtTokenIssuer, PlaceholderTokenIssuer, TokenIssuer};
use std::sync::Arc;

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    /// `None` only in development, where a placeholder token is issued
    pub jwt: Option<JwtConfig>,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        let jwt = if environment.is_production() {
            Some(JwtConfig::from_env()?) // Required in production
        } else {
            JwtConfig::from_env_optional()?
        };

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            jwt,
            environment,
        })
    }

    /// Token issuer for successful authentications
    pub fn token_issuer(&self) -> Arc<dyn TokenIssuer> {
        match &self.jwt {
            Some(jwt) => Arc::new(JwtTokenIssuer::new(jwt)),
            None => {
                tracing::warn!(
                    "JWT_SECRET not set: authentication returns a placeholder token (development only)"
                );
                Arc::new(PlaceholderTokenIssuer)
            }
        }
    }
}
