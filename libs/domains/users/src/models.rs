use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use utoipa::ToSchema;

/// Identifier key shared by stored documents and payloads
pub const ID_FIELD: &str = "_id";

/// Free-form document fields as received from a client
pub type Fields = Map<String, Value>;

/// Only these characters, at least 8 of them
static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*#?&]{8,}$").unwrap());
static PASSWORD_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]").unwrap());
static PASSWORD_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());
static PASSWORD_SPECIAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[@$!%*#?&]").unwrap());

/// Registration complexity rule: 8+ characters from the allowed set with at
/// least one letter, one digit and one of `@$!%*#?&`.
pub fn is_valid_password(password: &str) -> bool {
    PASSWORD_CHARSET.is_match(password)
        && PASSWORD_LETTER.is_match(password)
        && PASSWORD_DIGIT.is_match(password)
        && PASSWORD_SPECIAL.is_match(password)
}

/// Non-empty string value of `key`, if any
pub fn present_str<'a>(fields: &'a Fields, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Keys that a document store would read as an operator or a path
pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with('$') || key.contains('.')
}

/// A stored user: the store-assigned id plus every field it was created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 24-char hex object id
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl User {
    pub fn new(id: impl Into<String>, mut fields: Fields) -> Self {
        fields.remove(ID_FIELD);
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.fields.get("username").and_then(Value::as_str)
    }
}

/// OpenAPI shape of a stored user. Extra registration fields appear alongside.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(title = "User")]
pub struct UserSchema {
    #[serde(rename = "_id")]
    #[schema(example = "665f1c2e9b1d4a0012345678")]
    pub id: String,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Passw0rd!")]
    pub password: String,
}

/// OpenAPI shape of a registration or authentication body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Passw0rd!")]
    pub password: String,
}

/// Structural equality predicate: every field must equal the stored value literally.
///
/// Values are never interpreted as query operators. A missing stored field
/// compares equal to `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCriteria {
    fields: Fields,
}

impl MatchCriteria {
    /// Criteria from an authentication payload.
    ///
    /// Returns `None` when nothing could ever match: an empty payload or a
    /// reserved key.
    pub fn from_fields(fields: Fields) -> Option<Self> {
        if fields.is_empty() || fields.keys().any(|key| is_reserved_key(key)) {
            return None;
        }
        Some(Self { fields })
    }

    /// Exact username lookup
    pub fn username(username: &str) -> Self {
        let mut fields = Fields::new();
        fields.insert("username".to_string(), Value::String(username.to_string()));
        Self { fields }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn matches(&self, user: &User) -> bool {
        self.fields.iter().all(|(key, expected)| {
            if key == ID_FIELD {
                return expected.as_str() == Some(user.id.as_str());
            }
            user.fields.get(key).unwrap_or(&Value::Null) == expected
        })
    }
}
