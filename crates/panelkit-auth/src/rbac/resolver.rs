//! Effective-permission resolution over the role/permission graph.

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use panelkit_core::result::AppResult;
use panelkit_entity::permission::PermissionRef;
use panelkit_entity::role::RoleRef;

use crate::store::{AdminGrants, RbacStore};

/// An admin's resolved grant set.
///
/// `permissions` is deduplicated by permission id with first-occurrence
/// ordering (role-derived grants before direct grants, roles in assignment
/// order). `superuser` is carried at the role level — holders of the
/// reserved role bypass enumeration entirely downstream.
#[derive(Debug, Clone, Default)]
pub struct ResolvedGrants {
    /// Roles assigned to the admin.
    pub roles: Vec<RoleRef>,
    /// Effective permission set, deduplicated by id.
    pub permissions: Vec<PermissionRef>,
    /// Whether any assigned role is the reserved superuser role.
    pub superuser: bool,
}

impl ResolvedGrants {
    /// Flattened permission slugs, in resolution order.
    pub fn slugs(&self) -> Vec<String> {
        self.permissions.iter().map(|p| p.slug.clone()).collect()
    }
}

/// Resolves an admin's effective permissions from the store.
#[derive(Clone)]
pub struct PermissionResolver {
    /// Role/permission graph persistence.
    store: Arc<dyn RbacStore>,
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver").finish()
    }
}

impl PermissionResolver {
    /// Creates a resolver over the given store.
    pub fn new(store: Arc<dyn RbacStore>) -> Self {
        Self { store }
    }

    /// Resolves the effective permission set for one admin.
    ///
    /// One store read; unknown admin ids yield empty grants rather than an
    /// error — the downstream ability simply allows nothing.
    pub async fn resolve(&self, admin_id: Uuid) -> AppResult<ResolvedGrants> {
        let grants = self.store.admin_grants(admin_id).await?;
        Ok(resolve_grants(grants))
    }
}

/// Union of role-derived and direct grants, deduplicated by permission id
/// (first occurrence wins; identity is canonical so the source is
/// irrelevant).
pub fn resolve_grants(grants: AdminGrants) -> ResolvedGrants {
    let superuser = grants.roles.iter().any(RoleRef::is_super_admin);

    let mut seen = HashSet::new();
    let mut permissions = Vec::new();

    for permission in grants
        .role_permissions
        .into_iter()
        .chain(grants.direct_permissions)
    {
        if seen.insert(permission.id) {
            permissions.push(permission);
        }
    }

    ResolvedGrants {
        roles: grants.roles,
        permissions,
        superuser,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_entity::role::SUPER_ADMIN;

    fn perm(slug: &str) -> PermissionRef {
        PermissionRef {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            group: slug.split('.').next().unwrap_or("").to_string(),
        }
    }

    fn role(name: &str) -> RoleRef {
        RoleRef {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: name.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn union_deduplicates_by_permission_id() {
        // Role R1 grants {a, b}, role R2 grants {b, c}, direct grant {d}.
        let a = perm("users.a");
        let b = perm("users.b");
        let c = perm("users.c");
        let d = perm("users.d");

        let grants = AdminGrants {
            roles: vec![role("r1"), role("r2")],
            role_permissions: vec![a.clone(), b.clone(), b.clone(), c.clone()],
            direct_permissions: vec![d.clone()],
        };

        let resolved = resolve_grants(grants);

        assert!(!resolved.superuser);
        assert_eq!(resolved.permissions, vec![a, b, c, d]);
    }

    #[test]
    fn direct_duplicate_of_role_grant_is_dropped() {
        let a = perm("roles.list");

        let grants = AdminGrants {
            roles: vec![role("r1")],
            role_permissions: vec![a.clone()],
            direct_permissions: vec![a.clone()],
        };

        assert_eq!(resolve_grants(grants).permissions, vec![a]);
    }

    #[test]
    fn superuser_flag_set_from_role_name() {
        let grants = AdminGrants {
            roles: vec![role("editor"), role(SUPER_ADMIN)],
            role_permissions: vec![],
            direct_permissions: vec![],
        };

        assert!(resolve_grants(grants).superuser);
    }

    #[test]
    fn empty_grants_resolve_to_nothing() {
        let resolved = resolve_grants(AdminGrants::default());

        assert!(resolved.roles.is_empty());
        assert!(resolved.permissions.is_empty());
        assert!(!resolved.superuser);
    }
}
