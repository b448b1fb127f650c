//! Users Domain
//!
//! User accounts backed by a document store.
//!
//! # Features
//!
//! - List every stored user
//! - Registration with required fields, unique username and password rule
//! - Authentication by literal field match, answered with a token
//! - Shallow partial updates
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation order, token issuance
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← UserStore trait: MongoDB + in-memory
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, MatchCriteria, password rule
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_users::{InMemoryUserStore, PlaceholderTokenIssuer, UserService, handlers};
//!
//! let service = UserService::new(InMemoryUserStore::new(), Arc::new(PlaceholderTokenIssuer));
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod service;
pub mod store;
pub mod token;

pub use error::{StoreError, TokenError, UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{Fields, MatchCriteria, User, is_valid_password};
pub use self::mongodb::MongoUserStore;
pub use service::UserService;
pub use store::{InMemoryUserStore, UserStore};
pub use token::{JwtTokenIssuer, PLACEHOLDER_TOKEN, PlaceholderTokenIssuer, TokenIssuer};
