use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Fields, ID_FIELD, MatchCriteria, User};

/// Persistence interface for user documents
///
/// Implementations enforce username uniqueness on writes and report a
/// violation as [`StoreError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every stored user, unfiltered, in store order
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    /// First user matching `criteria`
    async fn find_one(&self, criteria: &MatchCriteria) -> Result<Option<User>, StoreError>;

    /// Persist a new document and return it with its assigned id
    async fn insert(&self, fields: Fields) -> Result<User, StoreError>;

    /// Shallow-merge `fields` into the user with `id`; returns the matched count
    async fn update_one(&self, id: &str, fields: Fields) -> Result<u64, StoreError>;
}

/// In-memory implementation of UserStore (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn username_of(fields: &Fields) -> Option<&serde_json::Value> {
    fields.get("username")
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_one(&self, criteria: &MatchCriteria) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| criteria.matches(u)).cloned())
    }

    async fn insert(&self, mut fields: Fields) -> Result<User, StoreError> {
        fields.remove(ID_FIELD);

        let mut users = self.users.write().await;

        if let Some(username) = username_of(&fields) {
            if users.iter().any(|u| username_of(&u.fields) == Some(username)) {
                return Err(StoreError::Duplicate);
            }
        }

        let user = User::new(ObjectId::new().to_hex(), fields);
        users.push(user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn update_one(&self, id: &str, mut fields: Fields) -> Result<u64, StoreError> {
        fields.remove(ID_FIELD);

        let mut users = self.users.write().await;

        let Some(index) = users.iter().position(|u| u.id == id) else {
            return Ok(0);
        };

        if let Some(username) = username_of(&fields) {
            let taken = users
                .iter()
                .enumerate()
                .any(|(i, u)| i != index && username_of(&u.fields) == Some(username));
            if taken {
                return Err(StoreError::Duplicate);
            }
        }

        users[index].fields.extend(fields);

        tracing::info!(user_id = %id, "Updated user");
        Ok(1)
    }
}
