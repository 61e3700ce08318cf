//! User model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{generate_id, IdKind};
use crate::records::Keyed;

/// A user, identified to clients by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(IdKind::User),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
}
