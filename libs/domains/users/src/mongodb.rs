//! MongoDB implementation of UserStore

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, oid::ObjectId, to_bson, to_document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::StoreError;
use crate::models::{Fields, ID_FIELD, MatchCriteria, User};
use crate::store::UserStore;

/// Default collection name
pub const USERS_COLLECTION: &str = "users";

const DUPLICATE_KEY: i32 = 11000;

/// MongoDB implementation of the UserStore
///
/// Documents are stored untyped so that every registration field survives
/// the round trip.
#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<Document>,
}

impl MongoUserStore {
    /// Create a new MongoUserStore on the `users` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let store = MongoUserStore::new(&client.database("tasky"));
    /// store.ensure_indexes().await?;
    /// ```
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, USERS_COLLECTION)
    }

    /// Create a new MongoUserStore with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Document>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }

    /// Create the unique index on `username`.
    ///
    /// Fails if existing documents already violate it.
    #[instrument(skip(self))]
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await.map_err(map_write_error)?;
        tracing::info!(collection = %self.collection.name(), "User indexes ensured");
        Ok(())
    }

    /// Literal-equality filter: `{ key: { $eq: value } }` for every criterion
    fn build_filter(criteria: &MatchCriteria) -> Result<Document, StoreError> {
        let mut filter = Document::new();

        for (key, value) in criteria.fields() {
            let operand = match (key.as_str(), value.as_str()) {
                (ID_FIELD, Some(hex)) => match ObjectId::parse_str(hex) {
                    Ok(oid) => Bson::ObjectId(oid),
                    Err(_) => Bson::String(hex.to_string()),
                },
                _ => to_bson(value).map_err(|e| StoreError::Serialization(e.to_string()))?,
            };
            filter.insert(key.clone(), doc! { "$eq": operand });
        }

        Ok(filter)
    }
}

fn to_fields_document(fields: &Fields) -> Result<Document, StoreError> {
    to_document(fields).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn into_user(mut document: Document) -> User {
    let id = match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        Some(other) => other.into_relaxed_extjson().to_string(),
        None => String::new(),
    };

    let fields = document
        .into_iter()
        .map(|(key, value)| (key, value.into_relaxed_extjson()))
        .collect();

    User { id, fields }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn map_write_error(err: mongodb::error::Error) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::Duplicate
    } else {
        StoreError::from(err)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(into_user).collect())
    }

    #[instrument(skip(self, criteria))]
    async fn find_one(&self, criteria: &MatchCriteria) -> Result<Option<User>, StoreError> {
        let filter = Self::build_filter(criteria)?;
        let document = self.collection.find_one(filter).await?;
        Ok(document.map(into_user))
    }

    #[instrument(skip(self, fields))]
    async fn insert(&self, mut fields: Fields) -> Result<User, StoreError> {
        fields.remove(ID_FIELD);

        let oid = ObjectId::new();
        let mut document = doc! { "_id": oid };
        for (key, value) in to_fields_document(&fields)? {
            document.insert(key, value);
        }

        self.collection
            .insert_one(document)
            .await
            .map_err(map_write_error)?;

        tracing::info!(user_id = %oid, "User created successfully");
        Ok(User::new(oid.to_hex(), fields))
    }

    #[instrument(skip(self, fields))]
    async fn update_one(&self, id: &str, mut fields: Fields) -> Result<u64, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(0);
        };
        let filter = doc! { "_id": oid };

        fields.remove(ID_FIELD);
        if fields.is_empty() {
            // `$set` rejects an empty document
            let count = self.collection.count_documents(filter).await?;
            return Ok(count);
        }

        let update = doc! { "$set": to_fields_document(&fields)? };
        let result = self
            .collection
            .update_one(filter, update)
            .await
            .map_err(map_write_error)?;

        tracing::info!(user_id = %id, matched = result.matched_count, "User update applied");
        Ok(result.matched_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_filter_wraps_every_value_in_eq() {
        let criteria = MatchCriteria::from_fields(fields(json!({
            "username": "alice",
            "password": { "$ne": "" }
        })))
        .unwrap();

        let filter = MongoUserStore::build_filter(&criteria).unwrap();
        assert_eq!(
            filter,
            doc! {
                "password": { "$eq": { "$ne": "" } },
                "username": { "$eq": "alice" },
            }
        );
    }

    #[test]
    fn test_filter_converts_hex_id() {
        let hex = "665f1c2e9b1d4a0012345678";
        let criteria = MatchCriteria::from_fields(fields(json!({ "_id": hex }))).unwrap();

        let filter = MongoUserStore::build_filter(&criteria).unwrap();
        let oid = ObjectId::parse_str(hex).unwrap();
        assert_eq!(filter, doc! { "_id": { "$eq": oid } });
    }

    #[test]
    fn test_filter_keeps_non_hex_id_as_string() {
        let criteria = MatchCriteria::from_fields(fields(json!({ "_id": "abc" }))).unwrap();
        let filter = MongoUserStore::build_filter(&criteria).unwrap();
        assert_eq!(filter, doc! { "_id": { "$eq": "abc" } });
    }

    #[test]
    fn test_into_user_renders_hex_id_and_plain_json() {
        let oid = ObjectId::new();
        let user = into_user(doc! {
            "_id": oid,
            "username": "alice",
            "age": 30_i64,
            "tags": ["a", "b"],
        });

        assert_eq!(user.id, oid.to_hex());
        assert_eq!(user.fields["username"], "alice");
        assert_eq!(user.fields["age"], 30);
        assert_eq!(user.fields["tags"], json!(["a", "b"]));
        assert!(!user.fields.contains_key("_id"));
    }
}
