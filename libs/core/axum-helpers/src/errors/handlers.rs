use axum::{http::StatusCode, response::Response};

use super::{error_response, messages};

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, messages::NOT_FOUND_RESOURCE)
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, messages::METHOD_NOT_ALLOWED)
}
