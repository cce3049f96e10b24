//! User model
//!
//! Defines the user record cached by the user service and its row encoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

fn default_active() -> bool {
    true
}

/// A user record.
///
/// # Fields
/// - `id`: Database identifier (0 until the database assigns one)
/// - `username`: Login name
/// - `email`: Contact address, see [`User::validate_email`]
/// - `created_at`: Creation time, serialized as RFC 3339
/// - `is_active`: Defaults to true when absent from a row
/// - `metadata`: Free-form attributes, empty when absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl User {
    /// Creates an active user stamped with the current time.
    pub fn new(id: u64, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            created_at: Utc::now(),
            is_active: true,
            metadata: Map::new(),
        }
    }

    /// Checks the email contains both an '@' and a '.'.
    pub fn validate_email(&self) -> bool {
        self.email.contains('@') && self.email.contains('.')
    }

    /// Encodes the user as a database row.
    pub fn to_row(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Decodes a user from a database row.
    pub fn from_row(row: Value) -> Result<Self> {
        Ok(serde_json::from_value(row)?)
    }
}

/// Partial update applied by `UserService::update_user`.
///
/// Only fields set to `Some` are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl UserUpdate {
    /// Writes the present fields into `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(metadata) = self.metadata {
            user.metadata = metadata;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.is_active.is_none()
            && self.metadata.is_none()
    }
}
