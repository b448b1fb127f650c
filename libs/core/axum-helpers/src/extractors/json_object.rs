//! JSON body extractor that only accepts a top-level object.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde_json::{Map, Value};

/// Free-form JSON object body.
///
/// Rejects a missing content type, malformed JSON, and any top-level value
/// that is not an object with a 400 "Invalid request body" envelope whose
/// `error` field carries the detail.
///
/// # Example
/// ```ignore
/// use axum::routing::post;
/// use axum_helpers::extractors::JsonObject;
///
/// async fn create(JsonObject(fields): JsonObject) -> String {
///     format!("{} fields", fields.len())
/// }
///
/// let app = axum::Router::new().route("/users", post(create));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            other => Err(AppError::InvalidBody(format!(
                "expected a JSON object, got {}",
                kind(&other)
            ))),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        response::IntoResponse,
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn echo(JsonObject(map): JsonObject) -> impl IntoResponse {
        Json(Value::Object(map))
    }

    async fn send(body: &'static str, content_type: Option<&str>) -> (StatusCode, Value) {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let response = Router::new()
            .route("/", post(echo))
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_accepts_object() {
        let (status, body) = send(r#"{"username":"alice"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
    }

    #[tokio::test]
    async fn test_rejects_array() {
        let (status, body) = send("[1,2]", Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert_eq!(body["msg"], "Invalid request body");
        assert_eq!(body["error"], "expected a JSON object, got an array");
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let (status, body) = send("{not json", Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Invalid request body");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_rejects_missing_content_type() {
        let (status, body) = send(r#"{"a":1}"#, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Invalid request body");
    }
}
