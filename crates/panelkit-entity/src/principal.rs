//! Principal domain shared between admins and end-users.

use serde::{Deserialize, Serialize};

/// The two independent identity domains.
///
/// Admins carry the role/permission system; users only authenticate.
/// Each kind has its own session table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    /// Administrative-panel identity.
    Admin,
    /// End-user identity (no permission system).
    User,
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Account-status flags consulted on every session validation.
///
/// Soft deletion and deactivation are modeled as explicit flags; nothing
/// relies on the store hiding dead rows implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PrincipalFlags {
    /// Whether the account may authenticate.
    pub is_active: bool,
    /// Whether the account is logically removed.
    pub is_deleted: bool,
}
