//! In-memory store using a Tokio mutex, for tests and single-node demos.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use panelkit_core::error::AppError;
use panelkit_core::result::AppResult;
use panelkit_entity::admin::{Admin, CreateAdmin};
use panelkit_entity::permission::{CreatePermission, Permission, PermissionRef, UpdatePermission};
use panelkit_entity::principal::{PrincipalFlags, PrincipalKind};
use panelkit_entity::role::{CreateRole, Role, RoleRef, UpdateRole};
use panelkit_entity::session::Session;
use panelkit_entity::user::{CreateUser, User};

use super::{AdminGrants, PrincipalStore, RbacStore, SessionStore};

/// Internal tables of the memory store.
#[derive(Debug, Default)]
struct InnerState {
    admins: Vec<Admin>,
    users: Vec<User>,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    /// (admin_id, role_id) edges.
    admin_roles: Vec<(Uuid, Uuid)>,
    /// (admin_id, permission_id) edges.
    admin_permissions: Vec<(Uuid, Uuid)>,
    /// (role_id, permission_id) edges.
    role_permissions: Vec<(Uuid, Uuid)>,
    admin_sessions: Vec<Session>,
    user_sessions: Vec<Session>,
}

impl InnerState {
    fn sessions(&self, kind: PrincipalKind) -> &Vec<Session> {
        match kind {
            PrincipalKind::Admin => &self.admin_sessions,
            PrincipalKind::User => &self.user_sessions,
        }
    }

    fn sessions_mut(&mut self, kind: PrincipalKind) -> &mut Vec<Session> {
        match kind {
            PrincipalKind::Admin => &mut self.admin_sessions,
            PrincipalKind::User => &mut self.user_sessions,
        }
    }
}

/// In-memory implementation of all three store traits.
///
/// Suitable for single-node deployments and the test suite only; state is
/// lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Protected inner tables.
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips an admin's active flag in place. Seeding/test helper; the HTTP
    /// surface has no admin-deactivation endpoint yet.
    pub async fn set_admin_active(&self, id: Uuid, is_active: bool) {
        let mut state = self.state.lock().await;
        if let Some(admin) = state.admins.iter_mut().find(|a| a.id == id) {
            admin.is_active = is_active;
            admin.updated_at = Utc::now();
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert(&self, kind: PrincipalKind, session: &Session) -> AppResult<()> {
        let mut state = self.state.lock().await;

        if state.sessions(kind).iter().any(|s| s.token == session.token) {
            return Err(AppError::conflict("Duplicate session token"));
        }

        state.sessions_mut(kind).push(session.clone());
        Ok(())
    }

    async fn find_by_token(&self, kind: PrincipalKind, token: &str) -> AppResult<Option<Session>> {
        let state = self.state.lock().await;
        Ok(state
            .sessions(kind)
            .iter()
            .find(|s| s.token == token)
            .cloned())
    }

    async fn revoke(
        &self,
        kind: PrincipalKind,
        token: &str,
        revoked_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut state = self.state.lock().await;

        let mut changed = 0;
        if let Some(session) = state
            .sessions_mut(kind)
            .iter_mut()
            .find(|s| s.token == token && !s.is_revoked)
        {
            session.is_revoked = true;
            session.revoked_at = Some(now);
            session.revoked_by = revoked_by;
            changed = 1;
        }

        Ok(changed)
    }

    async fn revoke_all_for(
        &self,
        kind: PrincipalKind,
        principal_id: Uuid,
        revoked_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut state = self.state.lock().await;

        let mut changed = 0;
        for session in state
            .sessions_mut(kind)
            .iter_mut()
            .filter(|s| s.principal_id == principal_id && !s.is_revoked)
        {
            session.is_revoked = true;
            session.revoked_at = Some(now);
            session.revoked_by = revoked_by;
            changed += 1;
        }

        Ok(changed)
    }

    async fn delete_dead(&self, kind: PrincipalKind, now: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.state.lock().await;

        let sessions = state.sessions_mut(kind);
        let before = sessions.len();
        sessions.retain(|s| !s.is_revoked && s.expires_at >= now);

        Ok((before - sessions.len()) as u64)
    }

    async fn find_active_for(
        &self,
        kind: PrincipalKind,
        principal_id: Uuid,
    ) -> AppResult<Vec<Session>> {
        let now = Utc::now();
        let state = self.state.lock().await;

        Ok(state
            .sessions(kind)
            .iter()
            .filter(|s| s.principal_id == principal_id && !s.is_revoked && s.expires_at > now)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PrincipalStore for MemoryStore {
    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        let state = self.state.lock().await;
        Ok(state.admins.iter().find(|a| a.email == email).cloned())
    }

    async fn find_admin_by_id(&self, id: Uuid) -> AppResult<Option<Admin>> {
        let state = self.state.lock().await;
        Ok(state.admins.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_admin(&self, data: &CreateAdmin) -> AppResult<Admin> {
        let mut state = self.state.lock().await;

        if state.admins.iter().any(|a| a.email == data.email) {
            return Err(AppError::conflict("Email already in use"));
        }

        let now = Utc::now();
        let admin = Admin {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            is_active: true,
            is_deleted: false,
            deleted_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
            created_by: data.created_by,
        };

        state.admins.push(admin.clone());
        Ok(admin)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;

        if state.users.iter().any(|u| u.email == data.email) {
            return Err(AppError::conflict("Email already in use"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            is_active: true,
            is_deleted: false,
            deleted_at: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };

        state.users.push(user.clone());
        Ok(user)
    }

    async fn principal_flags(
        &self,
        kind: PrincipalKind,
        id: Uuid,
    ) -> AppResult<Option<PrincipalFlags>> {
        let state = self.state.lock().await;

        let flags = match kind {
            PrincipalKind::Admin => state.admins.iter().find(|a| a.id == id).map(Admin::flags),
            PrincipalKind::User => state.users.iter().find(|u| u.id == id).map(User::flags),
        };

        Ok(flags)
    }

    async fn touch_last_login(
        &self,
        kind: PrincipalKind,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut state = self.state.lock().await;

        match kind {
            PrincipalKind::Admin => {
                if let Some(admin) = state.admins.iter_mut().find(|a| a.id == id) {
                    admin.last_login_at = Some(at);
                }
            }
            PrincipalKind::User => {
                if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
                    user.last_login_at = Some(at);
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl RbacStore for MemoryStore {
    async fn admin_grants(&self, admin_id: Uuid) -> AppResult<AdminGrants> {
        let state = self.state.lock().await;

        let mut grants = AdminGrants::default();

        for (_, role_id) in state.admin_roles.iter().filter(|(a, _)| *a == admin_id) {
            let Some(role) = state
                .roles
                .iter()
                .find(|r| r.id == *role_id && !r.is_deleted && r.is_active)
            else {
                continue;
            };

            grants.roles.push(RoleRef {
                id: role.id,
                name: role.name.clone(),
                slug: role.slug.clone(),
                display_name: role.display_name.clone(),
            });

            for (_, permission_id) in state.role_permissions.iter().filter(|(r, _)| *r == role.id)
            {
                if let Some(permission) = live_permission(&state.permissions, *permission_id) {
                    grants.role_permissions.push(permission.to_ref());
                }
            }
        }

        for (_, permission_id) in state
            .admin_permissions
            .iter()
            .filter(|(a, _)| *a == admin_id)
        {
            if let Some(permission) = live_permission(&state.permissions, *permission_id) {
                grants.direct_permissions.push(permission.to_ref());
            }
        }

        Ok(grants)
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let state = self.state.lock().await;

        let mut roles: Vec<Role> = state
            .roles
            .iter()
            .filter(|r| !r.is_deleted && r.is_active)
            .cloned()
            .collect();
        roles.sort_by_key(|r| r.order);

        Ok(roles)
    }

    async fn find_role(&self, id: Uuid) -> AppResult<Option<Role>> {
        let state = self.state.lock().await;
        Ok(state
            .roles
            .iter()
            .find(|r| r.id == id && !r.is_deleted)
            .cloned())
    }

    async fn create_role(&self, data: &CreateRole) -> AppResult<Role> {
        let mut state = self.state.lock().await;

        if state
            .roles
            .iter()
            .any(|r| !r.is_deleted && (r.name == data.name || r.slug == data.slug))
        {
            return Err(AppError::conflict("Role name or slug already in use"));
        }

        let now = Utc::now();
        let role = Role {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            slug: data.slug.clone(),
            display_name: data.display_name.clone(),
            description: data.description.clone(),
            is_default: data.is_default,
            order: data.order,
            is_active: true,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };

        state.roles.push(role.clone());
        Ok(role)
    }

    async fn update_role(&self, id: Uuid, data: &UpdateRole) -> AppResult<Role> {
        let mut state = self.state.lock().await;

        let role = state
            .roles
            .iter_mut()
            .find(|r| r.id == id && !r.is_deleted)
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        if let Some(display_name) = &data.display_name {
            role.display_name = display_name.clone();
        }
        if let Some(description) = &data.description {
            role.description = Some(description.clone());
        }
        if let Some(order) = data.order {
            role.order = order;
        }
        if let Some(is_active) = data.is_active {
            role.is_active = is_active;
        }
        role.updated_at = Utc::now();

        Ok(role.clone())
    }

    async fn soft_delete_role(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        let mut state = self.state.lock().await;

        let role = state
            .roles
            .iter_mut()
            .find(|r| r.id == id && !r.is_deleted)
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        role.is_deleted = true;
        role.deleted_at = Some(now);
        Ok(())
    }

    async fn role_permissions(&self, role_id: Uuid) -> AppResult<Vec<PermissionRef>> {
        let state = self.state.lock().await;

        Ok(state
            .role_permissions
            .iter()
            .filter(|(r, _)| *r == role_id)
            .filter_map(|(_, p)| live_permission(&state.permissions, *p))
            .map(Permission::to_ref)
            .collect())
    }

    async fn replace_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<()> {
        // Single lock guard makes the remove-then-insert atomic.
        let mut state = self.state.lock().await;

        state.role_permissions.retain(|(r, _)| *r != role_id);
        state
            .role_permissions
            .extend(permission_ids.iter().map(|p| (role_id, *p)));

        Ok(())
    }

    async fn list_permissions(&self, group: Option<&str>) -> AppResult<Vec<Permission>> {
        let state = self.state.lock().await;

        let mut permissions: Vec<Permission> = state
            .permissions
            .iter()
            .filter(|p| !p.is_deleted && p.is_active)
            .filter(|p| group.is_none_or(|g| p.group == g))
            .cloned()
            .collect();
        permissions.sort_by(|a, b| {
            (&a.group, a.group_order, a.order).cmp(&(&b.group, b.group_order, b.order))
        });

        Ok(permissions)
    }

    async fn create_permission(&self, data: &CreatePermission) -> AppResult<Permission> {
        let mut state = self.state.lock().await;

        if state
            .permissions
            .iter()
            .any(|p| !p.is_deleted && p.slug == data.slug)
        {
            return Err(AppError::conflict("Permission slug already in use"));
        }

        let now = Utc::now();
        let permission = Permission {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            slug: data.slug.clone(),
            display_name: data.display_name.clone(),
            group: data.group.clone(),
            group_order: data.group_order,
            order: data.order,
            is_active: true,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };

        state.permissions.push(permission.clone());
        Ok(permission)
    }

    async fn update_permission(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Permission> {
        let mut state = self.state.lock().await;

        let permission = state
            .permissions
            .iter_mut()
            .find(|p| p.id == id && !p.is_deleted)
            .ok_or_else(|| AppError::not_found("Permission not found"))?;

        if let Some(display_name) = &data.display_name {
            permission.display_name = display_name.clone();
        }
        if let Some(order) = data.order {
            permission.order = order;
        }
        if let Some(group_order) = data.group_order {
            permission.group_order = group_order;
        }
        if let Some(is_active) = data.is_active {
            permission.is_active = is_active;
        }
        permission.updated_at = Utc::now();

        Ok(permission.clone())
    }

    async fn soft_delete_permission(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        let mut state = self.state.lock().await;

        let permission = state
            .permissions
            .iter_mut()
            .find(|p| p.id == id && !p.is_deleted)
            .ok_or_else(|| AppError::not_found("Permission not found"))?;

        permission.is_deleted = true;
        permission.deleted_at = Some(now);
        Ok(())
    }

    async fn default_role(&self) -> AppResult<Option<Role>> {
        let state = self.state.lock().await;
        Ok(state
            .roles
            .iter()
            .find(|r| r.is_default && !r.is_deleted && r.is_active)
            .cloned())
    }

    async fn assign_role(&self, admin_id: Uuid, role_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;

        if !state.admin_roles.contains(&(admin_id, role_id)) {
            state.admin_roles.push((admin_id, role_id));
        }
        Ok(())
    }

    async fn grant_permission(&self, admin_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;

        if !state.admin_permissions.contains(&(admin_id, permission_id)) {
            state.admin_permissions.push((admin_id, permission_id));
        }
        Ok(())
    }
}

fn live_permission(permissions: &[Permission], id: Uuid) -> Option<&Permission> {
    permissions
        .iter()
        .find(|p| p.id == id && !p.is_deleted && p.is_active)
}
