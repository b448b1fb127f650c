pub mod codes;
pub mod handlers;
pub mod messages;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::Envelope;

/// Application error type rendered as an [`Envelope`].
///
/// Client errors carry the message shown in `msg`. `Internal` carries the
/// fault description placed in the envelope's `error` field, with `msg`
/// fixed to "Internal server error".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status, error code and envelope for this error
    pub fn to_envelope(&self) -> (ErrorCode, Envelope) {
        match self {
            AppError::InvalidBody(detail) => (
                ErrorCode::InvalidBody,
                Envelope::new(StatusCode::BAD_REQUEST, messages::INVALID_BODY)
                    .with_error(detail.clone()),
            ),
            AppError::BadRequest(msg) => (
                ErrorCode::BadRequest,
                Envelope::new(StatusCode::BAD_REQUEST, msg.clone()),
            ),
            AppError::Unauthorized(msg) => (
                ErrorCode::Unauthorized,
                Envelope::new(StatusCode::UNAUTHORIZED, msg.clone()),
            ),
            AppError::NotFound(msg) => (
                ErrorCode::NotFound,
                Envelope::new(StatusCode::NOT_FOUND, msg.clone()),
            ),
            AppError::Conflict(msg) => (
                ErrorCode::Conflict,
                Envelope::new(StatusCode::CONFLICT, msg.clone()),
            ),
            AppError::Internal(detail) => (
                ErrorCode::InternalError,
                Envelope::new(StatusCode::INTERNAL_SERVER_ERROR, messages::INTERNAL_ERROR)
                    .with_error(detail.clone()),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (error_code, envelope) = self.to_envelope();

        match error_code {
            ErrorCode::InternalError => {
                tracing::error!(error_code = %error_code, "Internal server error: {}", self)
            }
            _ => tracing::info!(error_code = %error_code, status = envelope.code, "{}", self),
        }

        envelope.into_response()
    }
}

/// Build an error envelope response directly.
///
/// ```rust,ignore
/// use axum_helpers::errors::error_response;
/// use axum::http::StatusCode;
///
/// let response = error_response(StatusCode::BAD_REQUEST, "Invalid input");
/// ```
pub fn error_response(status: StatusCode, msg: impl Into<String>) -> Response {
    Envelope::new(status, msg).into_response()
}
