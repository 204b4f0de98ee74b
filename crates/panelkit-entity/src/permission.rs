//! Permission entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A granular capability identified by a dot-delimited slug.
///
/// `group` + `group_order` + `order` define the stable two-level ordering
/// used for panel display and listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Unique machine name.
    pub name: String,
    /// Canonical dot-delimited slug, e.g. `"roles.delete"`.
    pub slug: String,
    /// Human-readable name shown in the panel.
    pub display_name: String,
    /// Grouping key, e.g. `"roles"`.
    pub group: String,
    /// Ordering of the group among groups.
    pub group_order: i32,
    /// Ordering within the group.
    pub order: i32,
    /// Whether the permission is grantable/evaluated.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the permission was soft-deleted, if ever.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the permission was created.
    pub created_at: DateTime<Utc>,
    /// When the permission was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Permission {
    /// Lightweight reference used in resolved grant sets.
    pub fn to_ref(&self) -> PermissionRef {
        PermissionRef {
            id: self.id,
            slug: self.slug.clone(),
            group: self.group.clone(),
        }
    }
}

/// Lightweight permission view carried through resolution and evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PermissionRef {
    /// Permission identifier (canonical identity for deduplication).
    pub id: Uuid,
    /// Dot-delimited slug.
    pub slug: String,
    /// Grouping key.
    pub group: String,
}

/// Data required to create a permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    /// Unique machine name.
    pub name: String,
    /// Canonical dot-delimited slug.
    pub slug: String,
    /// Human-readable name.
    pub display_name: String,
    /// Grouping key.
    pub group: String,
    /// Ordering of the group among groups.
    pub group_order: i32,
    /// Ordering within the group.
    pub order: i32,
}

/// Partial permission update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePermission {
    /// New human-readable name.
    pub display_name: Option<String>,
    /// New in-group ordering.
    pub order: Option<i32>,
    /// New group ordering.
    pub group_order: Option<i32>,
    /// Activate or deactivate the permission.
    pub is_active: Option<bool>,
}
