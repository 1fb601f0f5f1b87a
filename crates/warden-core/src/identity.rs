//! # Authenticated Identity
//!
//! The decoded token produced by a successful verification. Only the
//! subject identifier is guaranteed; `name`, `email` and any further claims
//! are carried when the token has them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique subject identifier.
    pub uid: String,
    /// Display name, when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address, when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Remaining token claims, flattened into the serialized form.
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl Identity {
    /// Identity carrying only a subject identifier.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: None,
            email: None,
            claims: Map::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Build an identity from a decoded claim set.
    ///
    /// The subject is read from `uid`, falling back to `sub`. Returns `None`
    /// when neither holds a non-empty string, so an identity is never
    /// partially populated.
    pub fn from_claims(mut claims: Map<String, Value>) -> Option<Self> {
        let uid = take_string(&mut claims, "uid").or_else(|| take_string(&mut claims, "sub"))?;
        if uid.trim().is_empty() {
            return None;
        }
        let name = take_string(&mut claims, "name");
        let email = take_string(&mut claims, "email");
        Some(Self {
            uid,
            name,
            email,
            claims,
        })
    }

    /// Whether the identity names a subject.
    pub fn is_complete(&self) -> bool {
        !self.uid.trim().is_empty()
    }
}

fn take_string(claims: &mut Map<String, Value>, key: &str) -> Option<String> {
    match claims.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            // Not a string: leave it as an ordinary claim.
            claims.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}
