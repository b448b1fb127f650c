use axum_helpers::{JwtConfig, JwtIssuer};

use crate::error::TokenError;

/// Token returned by [`PlaceholderTokenIssuer`]
pub const PLACEHOLDER_TOKEN: &str = "TEMPORARY_TOKEN";

/// Issues the credential returned after a successful authentication
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue_token(&self, user_id: &str) -> Result<String, TokenError>;
}

/// Signed HS256 access tokens with the user id as subject
#[derive(Debug, Clone)]
pub struct JwtTokenIssuer {
    issuer: JwtIssuer,
}

impl JwtTokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            issuer: JwtIssuer::new(config),
        }
    }

    pub fn issuer(&self) -> &JwtIssuer {
        &self.issuer
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_token(&self, user_id: &str) -> Result<String, TokenError> {
        self.issuer
            .issue(user_id)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// Fixed development token. Never wire this up in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTokenIssuer;

impl TokenIssuer for PlaceholderTokenIssuer {
    fn issue_token(&self, _user_id: &str) -> Result<String, TokenError> {
        Ok(PLACEHOLDER_TOKEN.to_string())
    }
}
