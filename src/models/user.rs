//! User model for storage and the leaderboard.

use super::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable user record.
///
/// Optional fields missing from a stored record deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned ID
    pub id: String,
    /// Platform user ID (unique across users)
    pub external_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Display name override chosen by the user
    #[serde(default)]
    pub custom_name: Option<String>,
    /// Never decreases
    #[serde(default)]
    pub score: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub external_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub score: u64,
}

impl From<&Identity> for NewUser {
    fn from(identity: &Identity) -> Self {
        Self {
            external_id: identity.id,
            username: identity.username.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            score: 0,
        }
    }
}

impl NewUser {
    /// Materialize the record under a store-assigned ID.
    pub fn into_user(self, id: String, now: DateTime<Utc>) -> User {
        User {
            id,
            external_id: self.external_id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            custom_name: None,
            score: self.score,
            created_at: now,
            updated_at: now,
        }
    }
}
