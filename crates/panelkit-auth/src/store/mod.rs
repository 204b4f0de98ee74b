//! Persistence trait seam for the session & permission core.
//!
//! The core consumes these traits rather than a concrete database so the
//! session manager and permission resolver stay testable without external
//! services. `panelkit-database` provides the PostgreSQL implementations;
//! [`MemoryStore`] backs tests and single-node demos.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use panelkit_core::result::AppResult;
use panelkit_entity::admin::{Admin, CreateAdmin};
use panelkit_entity::permission::{CreatePermission, Permission, PermissionRef, UpdatePermission};
use panelkit_entity::principal::{PrincipalFlags, PrincipalKind};
use panelkit_entity::role::{CreateRole, Role, RoleRef, UpdateRole};
use panelkit_entity::session::Session;
use panelkit_entity::user::{CreateUser, User};

pub use memory::MemoryStore;

/// Raw grant edges fetched for one admin, before deduplication.
///
/// `role_permissions` concatenates the permission lists of every assigned
/// role in role order; duplicates across sources are expected and resolved
/// by the permission resolver.
#[derive(Debug, Clone, Default)]
pub struct AdminGrants {
    /// Roles assigned to the admin.
    pub roles: Vec<RoleRef>,
    /// Permissions reachable through those roles.
    pub role_permissions: Vec<PermissionRef>,
    /// Permissions granted directly to the admin.
    pub direct_permissions: Vec<PermissionRef>,
}

/// Session persistence for one principal domain.
///
/// Implementations must enforce token uniqueness at the store level and
/// keep every operation atomic; the manager never issues multi-step
/// sequences against this trait.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Inserts one session row. Fails on token collision.
    async fn insert(&self, kind: PrincipalKind, session: &Session) -> AppResult<()>;

    /// Looks up a session by exact access-token match.
    async fn find_by_token(&self, kind: PrincipalKind, token: &str) -> AppResult<Option<Session>>;

    /// Marks the session matching `token` as revoked. A no-op for unknown
    /// or already-revoked tokens; returns the number of rows changed.
    async fn revoke(
        &self,
        kind: PrincipalKind,
        token: &str,
        revoked_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Revokes every non-revoked session of one principal. Returns the
    /// number of sessions revoked.
    async fn revoke_all_for(
        &self,
        kind: PrincipalKind,
        principal_id: Uuid,
        revoked_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Deletes rows where `expires_at < now` or `is_revoked`. Returns the
    /// number of rows deleted. Safe to run concurrently with live traffic.
    async fn delete_dead(&self, kind: PrincipalKind, now: DateTime<Utc>) -> AppResult<u64>;

    /// Lists the non-revoked, non-expired sessions of one principal.
    async fn find_active_for(
        &self,
        kind: PrincipalKind,
        principal_id: Uuid,
    ) -> AppResult<Vec<Session>>;
}

/// Principal (admin and user) account persistence.
#[async_trait]
pub trait PrincipalStore: Send + Sync + 'static {
    /// Finds an admin by email, including soft-deleted rows (the sign-in
    /// flow itself decides how to report dead accounts).
    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>>;

    /// Finds an admin by id.
    async fn find_admin_by_id(&self, id: Uuid) -> AppResult<Option<Admin>>;

    /// Inserts a new admin. Fails with a conflict error on duplicate email.
    async fn insert_admin(&self, data: &CreateAdmin) -> AppResult<Admin>;

    /// Finds a user by email, including soft-deleted rows.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Finds a user by id.
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Inserts a new user. Fails with a conflict error on duplicate email.
    async fn insert_user(&self, data: &CreateUser) -> AppResult<User>;

    /// Fetches the active/deleted flags of one principal, if it exists.
    async fn principal_flags(
        &self,
        kind: PrincipalKind,
        id: Uuid,
    ) -> AppResult<Option<PrincipalFlags>>;

    /// Records a successful sign-in time.
    async fn touch_last_login(
        &self,
        kind: PrincipalKind,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> AppResult<()>;
}

/// Role/permission graph persistence.
#[async_trait]
pub trait RbacStore: Send + Sync + 'static {
    /// Fetches all grant edges for one admin in a single read. Unknown
    /// admin ids yield empty grants, not an error.
    async fn admin_grants(&self, admin_id: Uuid) -> AppResult<AdminGrants>;

    /// Lists non-deleted, active roles ordered by `order`.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Finds a non-deleted role by id.
    async fn find_role(&self, id: Uuid) -> AppResult<Option<Role>>;

    /// Creates a role. Fails with a conflict error on duplicate name/slug.
    async fn create_role(&self, data: &CreateRole) -> AppResult<Role>;

    /// Applies a partial update to a role.
    async fn update_role(&self, id: Uuid, data: &UpdateRole) -> AppResult<Role>;

    /// Soft-deletes a role.
    async fn soft_delete_role(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<()>;

    /// Lists the permissions currently granted to a role.
    async fn role_permissions(&self, role_id: Uuid) -> AppResult<Vec<PermissionRef>>;

    /// Replaces a role's permission set with exactly `permission_ids`
    /// (replace, not merge). Runs atomically so a crash cannot leave the
    /// role with a partial set.
    async fn replace_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<()>;

    /// Lists non-deleted, active permissions ordered by
    /// (group, group_order, order), optionally filtered to one group.
    async fn list_permissions(&self, group: Option<&str>) -> AppResult<Vec<Permission>>;

    /// Creates a permission. Fails with a conflict error on duplicate slug.
    async fn create_permission(&self, data: &CreatePermission) -> AppResult<Permission>;

    /// Applies a partial update to a permission.
    async fn update_permission(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Permission>;

    /// Soft-deletes a permission.
    async fn soft_delete_permission(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<()>;

    /// The role auto-assigned to newly registered admins, if configured.
    async fn default_role(&self) -> AppResult<Option<Role>>;

    /// Assigns a role to an admin. Idempotent.
    async fn assign_role(&self, admin_id: Uuid, role_id: Uuid) -> AppResult<()>;

    /// Grants a permission directly to an admin. Idempotent.
    async fn grant_permission(&self, admin_id: Uuid, permission_id: Uuid) -> AppResult<()>;
}
