//! User entity model

use crate::core::entity::{Record, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A back-office user; `name` is stored exactly as sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub name: Value,
}

impl Record for User {
    fn resource_name() -> &'static str {
        "users"
    }

    fn label() -> &'static str {
        "User"
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Body of `POST /api/users` and `PUT /api/users/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: Value,
}

impl UserPayload {
    /// Read `name` from an arbitrary body; anything else is ignored
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            name: payload.get("name").cloned().unwrap_or_default(),
        }
    }
}
