use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{
    Fields, ID_FIELD, MatchCriteria, User, is_reserved_key, is_valid_password, present_str,
};
use crate::store::UserStore;
use crate::token::TokenIssuer;

/// Service layer for user account rules
pub struct UserService<S: UserStore> {
    store: Arc<S>,
    tokens: Arc<dyn TokenIssuer>,
}

impl<S: UserStore> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: S, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self {
            store: Arc::new(store),
            tokens,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every stored user, in store order
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        Ok(self.store.find_all().await?)
    }

    /// Register a new account from a free-form payload.
    ///
    /// Checks run in order and the first failure wins: required fields,
    /// username availability, password complexity, field names. Extra
    /// fields are stored as given; a client-supplied `_id` is dropped.
    #[instrument(skip(self, fields))]
    pub async fn register(&self, mut fields: Fields) -> UserResult<User> {
        fields.remove(ID_FIELD);

        let (Some(username), Some(password)) = (
            present_str(&fields, "username"),
            present_str(&fields, "password"),
        ) else {
            return Err(UserError::MissingFields);
        };

        if self
            .store
            .find_one(&MatchCriteria::username(username))
            .await?
            .is_some()
        {
            tracing::debug!(username, "Registration rejected: username taken");
            return Err(UserError::UsernameTaken);
        }

        if !is_valid_password(password) {
            return Err(UserError::InvalidPassword);
        }

        // Stored keys must stay usable as authentication criteria
        if let Some(key) = fields.keys().find(|key| is_reserved_key(key)) {
            return Err(UserError::InvalidField(key.clone()));
        }

        let user = self.store.insert(fields).await?;
        tracing::info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Find a user equal to every supplied field and issue a token for it.
    #[instrument(skip(self, fields))]
    pub async fn authenticate(&self, fields: Fields) -> UserResult<String> {
        let criteria = MatchCriteria::from_fields(fields).ok_or(UserError::AuthenticationFailed)?;

        let user = self
            .store
            .find_one(&criteria)
            .await?
            .ok_or(UserError::AuthenticationFailed)?;

        let token = self.tokens.issue_token(&user.id)?;
        tracing::info!(user_id = %user.id, "User authenticated");
        Ok(token)
    }

    /// Shallow partial update of the user with `id`; `_id` in the body is ignored.
    #[instrument(skip(self, fields))]
    pub async fn update_user(&self, id: &str, mut fields: Fields) -> UserResult<()> {
        fields.remove(ID_FIELD);

        if let Some(key) = fields.keys().find(|key| is_reserved_key(key)) {
            return Err(UserError::InvalidField(key.clone()));
        }

        match self.store.update_one(id, fields).await? {
            0 => Err(UserError::NotFound),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, TokenError};
    use crate::store::MockUserStore;
    use crate::token::{MockTokenIssuer, PlaceholderTokenIssuer};
    use serde_json::{Value, json};

    const USER_ID: &str = "665f1c2e9b1d4a0012345678";

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn alice() -> User {
        User::new(
            USER_ID,
            fields(json!({ "username": "alice", "password": "Passw0rd!" })),
        )
    }

    fn service(store: MockUserStore) -> UserService<MockUserStore> {
        UserService::new(store, Arc::new(PlaceholderTokenIssuer))
    }

    #[tokio::test]
    async fn test_register_missing_fields_touches_no_store() {
        let svc = service(MockUserStore::new());

        for payload in [
            json!({}),
            json!({ "username": "alice" }),
            json!({ "password": "Passw0rd!" }),
            json!({ "username": "", "password": "Passw0rd!" }),
            json!({ "username": null, "password": "Passw0rd!" }),
            json!({ "username": 42, "password": "Passw0rd!" }),
        ] {
            let err = svc.register(fields(payload.clone())).await.unwrap_err();
            assert!(matches!(err, UserError::MissingFields), "payload {}", payload);
        }
    }

    #[tokio::test]
    async fn test_register_conflict_wins_over_weak_password() {
        let mut store = MockUserStore::new();
        store
            .expect_find_one()
            .withf(|criteria| *criteria == MatchCriteria::username("alice"))
            .times(1)
            .returning(|_| Ok(Some(alice())));
        store.expect_insert().times(0);

        let err = service(store)
            .register(fields(json!({ "username": "alice", "password": "weak" })))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_register_weak_password_after_existence_check() {
        let mut store = MockUserStore::new();
        store.expect_find_one().times(1).returning(|_| Ok(None));
        store.expect_insert().times(0);

        let err = service(store)
            .register(fields(json!({ "username": "bob", "password": "password1" })))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_register_persists_whole_payload_without_id() {
        let mut store = MockUserStore::new();
        store.expect_find_one().returning(|_| Ok(None));
        store
            .expect_insert()
            .withf(|fields| {
                !fields.contains_key("_id")
                    && fields["username"] == "bob"
                    && fields["role"] == "admin"
            })
            .times(1)
            .returning(|fields| Ok(User::new(USER_ID, fields)));

        let user = service(store)
            .register(fields(json!({
                "_id": "client-chosen",
                "username": "bob",
                "password": "Passw0rd!",
                "role": "admin"
            })))
            .await
            .unwrap();

        assert_eq!(user.id, USER_ID);
        assert_eq!(user.fields["role"], "admin");
    }

    #[tokio::test]
    async fn test_register_rejects_reserved_field_after_password_check() {
        let mut store = MockUserStore::new();
        store.expect_find_one().returning(|_| Ok(None));
        store.expect_insert().times(0);
        let svc = service(store);

        let err = svc
            .register(fields(json!({
                "username": "bob",
                "password": "Passw0rd!",
                "contact.email": "b@x.io"
            })))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidField(key) if key == "contact.email"));

        let err = svc
            .register(fields(json!({
                "username": "bob",
                "password": "weak",
                "contact.email": "b@x.io"
            })))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_register_store_duplicate_surfaces_as_store_error() {
        let mut store = MockUserStore::new();
        store.expect_find_one().returning(|_| Ok(None));
        store
            .expect_insert()
            .returning(|_| Err(StoreError::Duplicate));

        let err = service(store)
            .register(fields(json!({ "username": "bob", "password": "Passw0rd!" })))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Store(StoreError::Duplicate)));
    }

    #[tokio::test]
    async fn test_register_existence_check_fault() {
        let mut store = MockUserStore::new();
        store
            .expect_find_one()
            .returning(|_| Err(StoreError::Backend("timeout".to_string())));
        store.expect_insert().times(0);

        let err = service(store)
            .register(fields(json!({ "username": "bob", "password": "Passw0rd!" })))
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::Store(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_authenticate_empty_payload_fails_without_lookup() {
        let mut store = MockUserStore::new();
        store.expect_find_one().times(0);

        let err = service(store).authenticate(Fields::new()).await.unwrap_err();
        assert!(matches!(err, UserError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_authenticate_operator_key_fails_without_lookup() {
        let mut store = MockUserStore::new();
        store.expect_find_one().times(0);

        let err = service(store)
            .authenticate(fields(json!({ "$where": "true" })))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_authenticate_issues_token_for_matched_user() {
        let mut store = MockUserStore::new();
        store
            .expect_find_one()
            .withf(|criteria| criteria.fields().len() == 2)
            .returning(|_| Ok(Some(alice())));

        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue_token()
            .withf(|user_id| user_id == USER_ID)
            .times(1)
            .returning(|_| Ok("signed".to_string()));

        let svc = UserService::new(store, Arc::new(tokens));
        let token = svc
            .authenticate(fields(json!({ "username": "alice", "password": "Passw0rd!" })))
            .await
            .unwrap();

        assert_eq!(token, "signed");
    }

    #[tokio::test]
    async fn test_authenticate_no_match() {
        let mut store = MockUserStore::new();
        store.expect_find_one().returning(|_| Ok(None));

        let err = service(store)
            .authenticate(fields(json!({ "username": "alice", "password": "nope" })))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_authenticate_token_fault() {
        let mut store = MockUserStore::new();
        store.expect_find_one().returning(|_| Ok(Some(alice())));

        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_issue_token()
            .returning(|_| Err(TokenError::Signing("no key".to_string())));

        let err = UserService::new(store, Arc::new(tokens))
            .authenticate(fields(json!({ "username": "alice" })))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Token(_)));
    }

    #[tokio::test]
    async fn test_update_strips_id_and_reports_match() {
        let mut store = MockUserStore::new();
        store
            .expect_update_one()
            .withf(|id, fields| id == USER_ID && !fields.contains_key("_id") && fields.len() == 1)
            .times(1)
            .returning(|_, _| Ok(1));

        service(store)
            .update_user(USER_ID, fields(json!({ "_id": "other", "age": 31 })))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_no_match_is_not_found() {
        let mut store = MockUserStore::new();
        store.expect_update_one().returning(|_, _| Ok(0));

        let err = service(store)
            .update_user(USER_ID, fields(json!({ "age": 31 })))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::NotFound));
    }

    #[tokio::test]
    async fn test_update_rejects_reserved_keys() {
        let mut store = MockUserStore::new();
        store.expect_update_one().times(0);
        let svc = service(store);

        for payload in [json!({ "$inc": { "age": 1 } }), json!({ "profile.age": 1 })] {
            let err = svc.update_user(USER_ID, fields(payload)).await.unwrap_err();
            assert!(matches!(err, UserError::InvalidField(_)));
        }
    }

    #[tokio::test]
    async fn test_list_propagates_store_fault() {
        let mut store = MockUserStore::new();
        store
            .expect_find_all()
            .returning(|| Err(StoreError::Backend("down".to_string())));

        let err = service(store).list_users().await.unwrap_err();
        assert!(matches!(err, UserError::Store(_)));
    }
}
