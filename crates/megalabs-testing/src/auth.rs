//! Mock ID token helpers for integration tests.
//!
//! The portal reads identity from `Authorization: Bearer <id token>`. In tests,
//! `MockIdToken` mints provider-shaped tokens with an empty signature so no real
//! identity provider is needed. Only the unverified decoding path accepts them.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value, json};

/// Configurable claims payload encoded as an unsigned JWT.
pub struct MockIdToken {
    payload: Map<String, Value>,
}

impl MockIdToken {
    /// Token whose `user_id` and `sub` both carry `subject`.
    pub fn new(subject: &str) -> Self {
        let mut payload = Map::new();
        payload.insert("user_id".into(), json!(subject));
        payload.insert("sub".into(), json!(subject));
        Self { payload }
    }

    /// Arbitrary payload, for tokens missing or mangling standard claims.
    pub fn from_payload(payload: Value) -> Self {
        Self {
            payload: payload.as_object().cloned().unwrap_or_default(),
        }
    }

    pub fn email(self, email: &str) -> Self {
        self.claim("email", email)
    }

    pub fn name(self, name: &str) -> Self {
        self.claim("name", name)
    }

    pub fn phone(self, phone: &str) -> Self {
        self.claim("phone_number", phone)
    }

    pub fn claim(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_owned(), value.into());
        self
    }

    /// `header.payload.signature` with a fixed RS256 header and a dummy signature.
    pub fn encode(&self) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(Value::Object(self.payload.clone()).to_string());
        let signature = URL_SAFE_NO_PAD.encode("unsigned");
        format!("{header}.{payload}.{signature}")
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.encode())
    }
}
