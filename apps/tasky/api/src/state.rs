//! Shared application state.

use mongodb::{Client, Database};

/// Cloned into route constructors; `Client` and `Database` share one pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
