//! API routes module

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Routes nested under /api by `axum_helpers::create_router`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/users", users::router(state))
}
