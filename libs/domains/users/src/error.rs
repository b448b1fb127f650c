use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

pub const MSG_MISSING_FIELDS: &str = "Missing required fields: username or password";
pub const MSG_USERNAME_TAKEN: &str = "Username already exists";
pub const MSG_INVALID_PASSWORD: &str = "Password must be at least 8 characters long, contain at least one letter, one number, and one special character";
pub const MSG_AUTH_FAILED: &str = "Authentication failed";
pub const MSG_UPDATE_NOT_FOUND: &str = "Unable to update user";

/// Failures reported by a [`UserStore`](crate::store::UserStore).
///
/// `Display` is the category only. Backend detail stays in the payload
/// and is logged, never sent to clients.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate username")]
    Duplicate,

    #[error("user store unavailable")]
    Backend(String),

    #[error("user document could not be encoded")]
    Serialization(String),
}

impl StoreError {
    /// Driver-level description for logs
    pub fn detail(&self) -> &str {
        match self {
            StoreError::Duplicate => "unique index on username rejected the write",
            StoreError::Backend(detail) | StoreError::Serialization(detail) => detail,
        }
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token could not be issued")]
    Signing(String),
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Missing required fields: username or password")]
    MissingFields,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Password does not meet complexity requirements")]
    InvalidPassword,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("User not found")]
    NotFound,

    #[error("Invalid field name '{0}'")]
    InvalidField(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized envelope responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::MissingFields => AppError::BadRequest(MSG_MISSING_FIELDS.to_string()),
            UserError::UsernameTaken | UserError::Store(StoreError::Duplicate) => {
                AppError::Conflict(MSG_USERNAME_TAKEN.to_string())
            }
            UserError::InvalidPassword => AppError::BadRequest(MSG_INVALID_PASSWORD.to_string()),
            UserError::AuthenticationFailed => AppError::Unauthorized(MSG_AUTH_FAILED.to_string()),
            UserError::NotFound => AppError::NotFound(MSG_UPDATE_NOT_FOUND.to_string()),
            UserError::InvalidField(key) => {
                AppError::BadRequest(format!("Invalid field name '{}'", key))
            }
            UserError::Store(e) => {
                tracing::error!(detail = e.detail(), "User store fault: {}", e);
                AppError::Internal(e.to_string())
            }
            UserError::Token(e) => {
                tracing::error!("Token issuance fault: {:?}", e);
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
