//! MongoUserStore against a real MongoDB (testcontainers)
//!
//! Run with `cargo test -p domain_users --test mongodb_test -- --ignored`;
//! Docker must be available.

use domain_users::*;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestMongo};

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

async fn store(mongo: &TestMongo, name: &str) -> MongoUserStore {
    let store = MongoUserStore::new(&mongo.database(name));
    store.ensure_indexes().await.unwrap();
    store
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_find() {
    let mongo = TestMongo::new().await;
    let store = store(&mongo, "users_insert_find").await;
    let builder = TestDataBuilder::from_test_name("mongo_insert_find");

    let mut payload = fields(builder.registration("main"));
    payload.insert("age".to_string(), json!(30));
    let created = store.insert(payload).await.unwrap();

    let found = store
        .find_one(&MatchCriteria::username(&builder.username("main")))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.fields["age"], 30);
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_index_reports_duplicate() {
    let mongo = TestMongo::new().await;
    let store = store(&mongo, "users_duplicate").await;

    store.insert(fields(json!({ "username": "alice" }))).await.unwrap();
    let err = store
        .insert(fields(json!({ "username": "alice" })))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Duplicate));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_operator_values_are_literal() {
    let mongo = TestMongo::new().await;
    let store = store(&mongo, "users_literal").await;
    store
        .insert(fields(json!({ "username": "bob", "password": "Passw0rd!" })))
        .await
        .unwrap();

    let injected = MatchCriteria::from_fields(fields(json!({
        "username": "bob",
        "password": { "$ne": "" }
    })))
    .unwrap();

    assert!(store.find_one(&injected).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_hex_id() {
    let mongo = TestMongo::new().await;
    let store = store(&mongo, "users_by_id").await;
    let created = store.insert(fields(json!({ "username": "carol" }))).await.unwrap();

    let by_id = MatchCriteria::from_fields(fields(json!({ "_id": created.id }))).unwrap();
    let found = store.find_one(&by_id).await.unwrap().unwrap();
    assert_eq!(found.username(), Some("carol"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_one_counts() {
    let mongo = TestMongo::new().await;
    let store = store(&mongo, "users_update").await;
    let created = store.insert(fields(json!({ "username": "dave" }))).await.unwrap();

    let patch = fields(json!({ "city": "Oslo" }));
    assert_eq!(store.update_one(&created.id, patch.clone()).await.unwrap(), 1);
    assert_eq!(store.update_one(&created.id, patch).await.unwrap(), 1);
    assert_eq!(store.update_one(&created.id, Fields::new()).await.unwrap(), 1);

    let builder = TestDataBuilder::from_test_name("mongo_update_missing");
    assert_eq!(
        store
            .update_one(&builder.object_id(), fields(json!({ "a": 1 })))
            .await
            .unwrap(),
        0
    );
    assert_eq!(
        store
            .update_one("not-hex", fields(json!({ "a": 1 })))
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_rename_onto_existing_is_duplicate() {
    let mongo = TestMongo::new().await;
    let store = store(&mongo, "users_rename").await;
    store.insert(fields(json!({ "username": "erin" }))).await.unwrap();
    let frank = store.insert(fields(json!({ "username": "frank" }))).await.unwrap();

    let err = store
        .update_one(&frank.id, fields(json!({ "username": "erin" })))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Duplicate));
}
