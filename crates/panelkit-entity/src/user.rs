//! End-user entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::principal::PrincipalFlags;

/// A registered end-user. Users authenticate but have no permission system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash. `None` for social-only accounts.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the account was soft-deleted, if ever.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Last successful sign-in time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Status flags consulted during session validation.
    pub fn flags(&self) -> PrincipalFlags {
        PrincipalFlags {
            is_active: self.is_active,
            is_deleted: self.is_deleted,
        }
    }
}

/// Data required to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address (must be unique).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}
