//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Sign-up request body (user domain and admin registration share it).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Plaintext password; hashed before it leaves the auth crate.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}

/// Sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    /// Email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create role request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    /// Unique machine name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// URL-safe slug.
    #[validate(length(min = 1, max = 100, message = "Slug is required"))]
    pub slug: String,
    /// Human-readable name.
    #[validate(length(min = 1, max = 255, message = "Display name is required"))]
    pub display_name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Auto-assign to newly registered admins.
    #[serde(default)]
    pub is_default: bool,
    /// Display ordering.
    #[serde(default)]
    pub order: i32,
}

/// Partial role update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    /// New human-readable name.
    #[validate(length(min = 1, max = 255))]
    pub display_name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New display ordering.
    pub order: Option<i32>,
    /// Activate or deactivate the role.
    pub is_active: Option<bool>,
}

/// Replace a role's permission set (replace, not merge).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceRolePermissionsRequest {
    /// The complete new permission set. An empty list clears all grants.
    pub permission_ids: Vec<Uuid>,
}

/// Create permission request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePermissionRequest {
    /// Unique machine name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Canonical dot-delimited slug, e.g. `"roles.delete"`.
    #[validate(length(min = 1, max = 100, message = "Slug is required"))]
    pub slug: String,
    /// Human-readable name.
    #[validate(length(min = 1, max = 255, message = "Display name is required"))]
    pub display_name: String,
    /// Grouping key, e.g. `"roles"`.
    #[validate(length(min = 1, max = 100, message = "Group is required"))]
    pub group: String,
    /// Ordering of the group among groups.
    #[serde(default)]
    pub group_order: i32,
    /// Ordering within the group.
    #[serde(default)]
    pub order: i32,
}

/// Partial permission update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePermissionRequest {
    /// New human-readable name.
    #[validate(length(min = 1, max = 255))]
    pub display_name: Option<String>,
    /// New in-group ordering.
    pub order: Option<i32>,
    /// New group ordering.
    pub group_order: Option<i32>,
    /// Activate or deactivate the permission.
    pub is_active: Option<bool>,
}

/// Query parameters for permission listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPermissionsQuery {
    /// Restrict the listing to one group.
    pub group: Option<String>,
}
