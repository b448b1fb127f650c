use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default access token lifetime
pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub jti: String, // JWT ID
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Stateless HS256 token issuer
#[derive(Clone)]
pub struct JwtIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl JwtIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_secs = config.ttl_secs, "JWT issuer initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_secs: config.ttl_secs,
        }
    }

    /// Sign a token for `subject`
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(JwtError::Encode)
    }

    /// Verify JWT token signature and expiry and decode claims
    pub fn verify(&self, token: &str) -> Result<JwtClaims, JwtError> {
        decode::<JwtClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(JwtError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> JwtIssuer {
        JwtIssuer::new(&JwtConfig::new("this-is-a-valid-secret-with-32-chars!"))
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();
        let token = issuer.issue("665f1c2e9b1d4a0012345678").unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "665f1c2e9b1d4a0012345678");
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_each_token_has_unique_jti() {
        let issuer = issuer();
        let a = issuer.verify(&issuer.issue("user").unwrap()).unwrap();
        let b = issuer.verify(&issuer.issue("user").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let token = issuer().issue("user").unwrap();
        let other = JwtIssuer::new(&JwtConfig::new("another-secret-that-is-also-32-chars-long"));
        assert!(matches!(other.verify(&token), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let config =
            JwtConfig::new("this-is-a-valid-secret-with-32-chars!").with_ttl_secs(-3600);
        let issuer = JwtIssuer::new(&config);
        let token = issuer.issue("user").unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(issuer().verify("not-a-jwt").is_err());
    }
}
