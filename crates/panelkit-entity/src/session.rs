//! Session entity model.
//!
//! One row per sign-in. Admin and user sessions share this shape but live
//! in separate tables; [`super::principal::PrincipalKind`] selects which.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A server-side record binding an issued token pair to a principal.
///
/// Valid iff not revoked, not past `expires_at`, and the owning principal
/// is active and not soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// Owning principal (admin or user id, depending on the table).
    pub principal_id: Uuid,
    /// Opaque bearer access token. Unique at the store level.
    pub token: String,
    /// Opaque high-entropy refresh token. Currently inert (no exchange flow).
    pub refresh_token: String,
    /// Client IP recorded at sign-in (audit only).
    pub ip_address: Option<String>,
    /// Client user agent recorded at sign-in (audit only).
    pub user_agent: Option<String>,
    /// Hard expiry; past this instant the session can never validate.
    pub expires_at: DateTime<Utc>,
    /// Explicit revocation flag. Terminal once set.
    pub is_revoked: bool,
    /// When the session was revoked, if ever.
    pub revoked_at: Option<DateTime<Utc>>,
    /// The actor who revoked the session (self on sign-out).
    pub revoked_by: Option<Uuid>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

/// Optional client metadata captured at session creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientMeta {
    /// Requesting IP address.
    pub ip_address: Option<String>,
    /// Requesting user agent.
    pub user_agent: Option<String>,
}
