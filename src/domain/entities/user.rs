//! User entity loaded for authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticatable user record.
///
/// Mirrors a row of the configured user table. The record is owned and
/// mutated by the database; this crate only reads it and caches a JSON
/// snapshot keyed by [`User::cache_key`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        email: String,
        name: String,
        password_hash: String,
        email_verified_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            email_verified_at,
            created_at,
            updated_at,
        }
    }

    /// Returns the cache key for this record, `user_<id>`.
    pub fn cache_key(&self) -> String {
        user_cache_key(self.id)
    }

    /// Returns true if the email address has been verified.
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

/// Builds the cache key for a user id.
///
/// The key is deterministic so that the loader and the invalidator always
/// address the same entry.
pub fn user_cache_key(id: i64) -> String {
    format!("user_{}", id)
}

/// Partial update for an existing user.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub email_verified_at: Option<DateTime<Utc>>,
}

impl UserPatch {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.password_hash.is_none()
            && self.email_verified_at.is_none()
    }
}
