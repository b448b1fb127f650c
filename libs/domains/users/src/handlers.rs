use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use axum_helpers::{
    AppError, Envelope, JsonObject,
    errors::responses::{
        ConflictResponse, InternalServerErrorResponse, InvalidBodyResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::models::{Credentials, UserSchema};
use crate::service::UserService;
use crate::store::UserStore;

pub const MSG_CREATED: &str = "Successfully created new user";
pub const MSG_AUTHENTICATED: &str = "Authentication successful";
pub const MSG_UPDATED: &str = "User updated successfully";

/// Action value that turns `POST /users` into a registration
pub const ACTION_REGISTER: &str = "register";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_or_authenticate, update_user),
    components(
        schemas(UserSchema, Credentials, Envelope),
        responses(
            ConflictResponse,
            InternalServerErrorResponse,
            InvalidBodyResponse,
            NotFoundResponse,
            UnauthorizedResponse
        )
    ),
    tags(
        (name = "Users", description = "User account endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<S: UserStore + 'static>(service: UserService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_or_authenticate))
        .route("/{id}", put(update_user))
        .with_state(shared_service)
}

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActionQuery {
    /// `register` creates an account; anything else authenticates
    pub action: Option<String>,
}

impl ActionQuery {
    /// Read `action` from raw query pairs.
    ///
    /// A repeated `action` has no single value, so it never selects
    /// registration.
    fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut actions = pairs.iter().filter(|(key, _)| key == "action");
        let action = match (actions.next(), actions.next()) {
            (Some((_, value)), None) => Some(value.clone()),
            _ => None,
        };
        Self { action }
    }

    fn is_register(&self) -> bool {
        self.action.as_deref() == Some(ACTION_REGISTER)
    }
}

/// List every user
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All users in store order", body = Vec<UserSchema>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
) -> Result<Json<Vec<crate::models::User>>, AppError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Register (`?action=register`) or authenticate
///
/// Authentication matches every supplied field literally against the stored user.
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    params(ActionQuery),
    request_body = Credentials,
    responses(
        (status = 201, description = "Successfully created new user", body = Envelope),
        (status = 200, description = "Authentication successful", body = Envelope),
        (status = 400, description = "Missing fields, weak password or invalid body", body = Envelope),
        (status = 401, response = UnauthorizedResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_or_authenticate<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
    Query(pairs): Query<Vec<(String, String)>>,
    JsonObject(fields): JsonObject,
) -> Result<Envelope, AppError> {
    if ActionQuery::from_pairs(&pairs).is_register() {
        service.register(fields).await?;
        Ok(Envelope::new(StatusCode::CREATED, MSG_CREATED))
    } else {
        let token = service.authenticate(fields).await?;
        Ok(Envelope::new(StatusCode::OK, MSG_AUTHENTICATED).with_token(token))
    }
}

/// Partially update a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User id (24-char hex)")
    ),
    request_body(content = UserSchema, description = "Fields to set; `_id` is ignored"),
    responses(
        (status = 200, description = "User updated successfully", body = Envelope),
        (status = 400, response = InvalidBodyResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<S: UserStore>(
    State(service): State<Arc<UserService<S>>>,
    Path(id): Path<String>,
    JsonObject(fields): JsonObject,
) -> Result<Envelope, AppError> {
    service.update_user(&id, fields).await?;
    Ok(Envelope::new(StatusCode::OK, MSG_UPDATED))
}
