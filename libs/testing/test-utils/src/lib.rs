//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the domain crates:
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongodb")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Envelope assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_store_test() {
//!     let mongo = TestMongo::new().await;
//!     let db = mongo.database("my_test");
//!     let builder = TestDataBuilder::from_test_name("my_store_test");
//!
//!     let payload = builder.registration("main");
//! }
//! ```

use serde_json::{Value, json};

#[cfg(feature = "mongodb")]
mod mongo;

#[cfg(feature = "mongodb")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic values
///
/// This keeps tests reproducible: the same seed always yields the same data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_register_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique username for this test
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.username("main"), "user-7-main");
    /// ```
    pub fn username(&self, suffix: &str) -> String {
        format!("user-{}-{}", self.seed, suffix)
    }

    /// Password that satisfies the registration complexity rule
    pub fn password(&self) -> String {
        format!("Passw0rd!{}", self.seed % 10_000)
    }

    /// Registration payload `{username, password}`
    pub fn registration(&self, suffix: &str) -> Value {
        json!({
            "username": self.username(suffix),
            "password": self.password(),
        })
    }

    /// Well-formed but deterministic 24-char hex object id
    pub fn object_id(&self) -> String {
        format!("{:024x}", self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert an envelope's `code` and `msg`
    pub fn assert_envelope(body: &Value, code: u16, msg: &str) {
        assert_eq!(
            body["code"], code,
            "envelope code mismatch in {}",
            body
        );
        assert_eq!(body["msg"], msg, "envelope msg mismatch in {}", body);
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
