//! Standard envelope messages for consistent error responses.

pub const INVALID_BODY: &str = "Invalid request body";
pub const NOT_FOUND_RESOURCE: &str = "The requested resource was not found";
pub const METHOD_NOT_ALLOWED: &str = "The HTTP method is not allowed for this resource";
pub const INTERNAL_ERROR: &str = "Internal server error";
