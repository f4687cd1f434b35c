use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::document::{as_flag, first_present};
use super::timestamp::parse_timestamp;

/// A stored user profile document. Only the fields the dashboard reads are
/// exposed.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    doc: Value,
}

impl UserRecord {
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }

    pub fn email(&self) -> Option<&str> {
        first_present(&self.doc, &["email"]).and_then(Value::as_str)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        first_present(&self.doc, &["createdAt", "created_at", "timestamp"])
            .and_then(parse_timestamp)
    }

    pub fn is_profile_complete(&self) -> bool {
        as_flag(first_present(
            &self.doc,
            &["profileCompleted", "isProfileComplete", "onboardingCompleted"],
        ))
    }
}

impl From<Value> for UserRecord {
    fn from(doc: Value) -> Self {
        Self::new(doc)
    }
}

impl<'de> Deserialize<'de> for UserRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::new)
    }
}
