//! Configuration types for axum-helpers.
//!
//! `JwtConfig` implements the `FromEnv` trait from `core_config`, following
//! the same pattern as `ServerConfig` and `MongoConfig`.

use core_config::{ConfigError, FromEnv, env_optional, env_required};

use super::jwt::ACCESS_TOKEN_TTL;

const MIN_SECRET_LEN: usize = 32;

/// JWT signing configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - Must be at least 32 characters
/// - `JWT_TTL_SECS` (optional) - Token lifetime, defaults to 15 minutes
///
/// # Example
///
/// ```ignore
/// use axum_helpers::JwtConfig;
/// use core_config::FromEnv;
///
/// // From environment variables
/// let config = JwtConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = JwtConfig::new("my-super-secret-key-that-is-at-least-32-chars");
/// ```
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl_secs: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and the default lifetime.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= MIN_SECRET_LEN,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_secs: ACCESS_TOKEN_TTL,
        }
    }

    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Load the config if `JWT_SECRET` is set.
    ///
    /// Returns `Ok(None)` when the variable is unset or blank, and an error
    /// when it is set but unusable.
    pub fn from_env_optional() -> Result<Option<Self>, ConfigError> {
        match env_optional("JWT_SECRET") {
            Some(_) => Self::from_env().map(Some),
            None => Ok(None),
        }
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_secs = match env_optional("JWT_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or_else(|| ConfigError::ParseError {
                    key: "JWT_TTL_SECS".to_string(),
                    details: format!("expected a positive number of seconds, got '{raw}'"),
                })?,
            None => ACCESS_TOKEN_TTL,
        };

        Ok(Self { secret, ttl_secs })
    }
}
