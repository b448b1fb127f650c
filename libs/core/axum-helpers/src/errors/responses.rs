//! Reusable OpenAPI response types for envelope-shaped errors.

use crate::envelope::Envelope;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 500,
        "msg": "Internal server error",
        "error": "user store unavailable"
    })
)]
pub struct InternalServerErrorResponse(pub Envelope);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - body is not a JSON object",
    content_type = "application/json",
    example = json!({
        "code": 400,
        "msg": "Invalid request body",
        "error": "expected a JSON object"
    })
)]
pub struct InvalidBodyResponse(pub Envelope);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 404,
        "msg": "The requested resource was not found"
    })
)]
pub struct NotFoundResponse(pub Envelope);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized",
    content_type = "application/json",
    example = json!({
        "code": 401,
        "msg": "Authentication failed"
    })
)]
pub struct UnauthorizedResponse(pub Envelope);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "code": 409,
        "msg": "Username already exists"
    })
)]
pub struct ConflictResponse(pub Envelope);
