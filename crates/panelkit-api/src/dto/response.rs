//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use panelkit_entity::admin::Admin;
use panelkit_entity::role::RoleRef;
use panelkit_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User sign-in response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAuthResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// Session expiry.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: User,
}

/// Admin sign-in response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAuthResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// Session expiry.
    pub expires_at: DateTime<Utc>,
    /// The signed-in admin.
    pub admin: Admin,
}

/// Admin profile with resolved authorization state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfileResponse {
    /// The admin account.
    pub admin: Admin,
    /// Assigned roles.
    pub roles: Vec<RoleRef>,
    /// Flattened, deduplicated permission slugs in resolution order.
    pub permissions: Vec<String>,
    /// Whether the reserved superuser role is held.
    pub is_super_admin: bool,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Bulk session-revocation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeSessionsResponse {
    /// Number of sessions revoked.
    pub revoked: u64,
}

/// Service health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
