//! Role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reserved role identifier granting unconditional access.
///
/// Recognized by name/slug, not by a dedicated column. Both the permission
/// resolver and the ability evaluator special-case it.
pub const SUPER_ADMIN: &str = "super_admin";

/// A named, orderable group of permissions assignable to admins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: Uuid,
    /// Unique machine name, e.g. `"content_editor"`.
    pub name: String,
    /// URL-safe slug.
    pub slug: String,
    /// Human-readable name shown in the panel.
    pub display_name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether this role is auto-assigned to newly registered admins.
    pub is_default: bool,
    /// Display ordering.
    pub order: i32,
    /// Whether the role is usable.
    pub is_active: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// When the role was soft-deleted, if ever.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Whether this is the reserved superuser role.
    pub fn is_super_admin(&self) -> bool {
        self.name == SUPER_ADMIN || self.slug == SUPER_ADMIN
    }
}

/// Lightweight role view attached to sessions and profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RoleRef {
    /// Role identifier.
    pub id: Uuid,
    /// Machine name.
    pub name: String,
    /// URL-safe slug.
    pub slug: String,
    /// Human-readable name.
    pub display_name: String,
}

impl RoleRef {
    /// Whether this is the reserved superuser role.
    pub fn is_super_admin(&self) -> bool {
        self.name == SUPER_ADMIN || self.slug == SUPER_ADMIN
    }
}

/// Data required to create a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    /// Unique machine name.
    pub name: String,
    /// URL-safe slug.
    pub slug: String,
    /// Human-readable name.
    pub display_name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Auto-assign to new admins.
    pub is_default: bool,
    /// Display ordering.
    pub order: i32,
}

/// Partial role update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRole {
    /// New human-readable name.
    pub display_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New display ordering.
    pub order: Option<i32>,
    /// Activate or deactivate the role.
    pub is_active: Option<bool>,
}
