//! Users API routes

use axum::Router;
use domain_users::{MongoUserStore, UserService, handlers};

use crate::state::AppState;

/// Create the users router backed by the `users` collection
pub fn router(state: &AppState) -> Router {
    let store = MongoUserStore::new(&state.db);
    let service = UserService::new(store, state.config.token_issuer());
    handlers::router(service)
}

/// Create the unique username index
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoUserStore::new(db)
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e.detail()))?;
    tracing::info!("User collection indexes created");
    Ok(())
}
