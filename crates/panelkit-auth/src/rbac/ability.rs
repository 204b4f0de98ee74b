//! The queryable authorization view built from resolved grants.

use std::collections::HashSet;

use panelkit_core::error::AppError;
use panelkit_entity::permission::PermissionRef;
use panelkit_entity::role::RoleRef;

use super::resolver::ResolvedGrants;

/// Point-in-time authorization view for one admin.
///
/// Grant-only: a slug is either present or absent; there are no deny rules
/// and no wildcard/prefix matching. Slugs are treated as opaque,
/// case-sensitive strings.
#[derive(Debug, Clone)]
pub struct Ability {
    /// Reserved-role bypass. When set, `can` is unconditionally true.
    superuser: bool,
    /// Exact-match grant set.
    slugs: HashSet<String>,
}

/// Outcome of checking a required-permission list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityCheck {
    /// Whether every required slug is granted.
    pub allowed: bool,
    /// The first requirement that failed, for diagnostic logging.
    pub missing: Option<String>,
}

impl Ability {
    /// Builds an ability from roles and a resolved permission set.
    ///
    /// The superuser marker is re-checked here even though the resolver
    /// also flags it, so neither layer alone is load-bearing.
    pub fn build(roles: &[RoleRef], permissions: &[PermissionRef]) -> Self {
        let superuser = roles.iter().any(RoleRef::is_super_admin);
        let slugs = permissions.iter().map(|p| p.slug.clone()).collect();

        Self { superuser, slugs }
    }

    /// Builds an ability from a resolver output.
    pub fn from_grants(grants: &ResolvedGrants) -> Self {
        let mut ability = Self::build(&grants.roles, &grants.permissions);
        ability.superuser = ability.superuser || grants.superuser;
        ability
    }

    /// Whether the principal may perform the capability named by `slug`.
    pub fn can(&self, slug: &str) -> bool {
        self.superuser || self.slugs.contains(slug)
    }

    /// Whether the reserved superuser role is held.
    pub fn is_superuser(&self) -> bool {
        self.superuser
    }

    /// Checks a required-slug list, short-circuiting on the first failure.
    pub fn check_all<'a, I>(&self, slugs: I) -> AbilityCheck
    where
        I: IntoIterator<Item = &'a str>,
    {
        for slug in slugs {
            if !self.can(slug) {
                return AbilityCheck {
                    allowed: false,
                    missing: Some(slug.to_string()),
                };
            }
        }

        AbilityCheck {
            allowed: true,
            missing: None,
        }
    }

    /// Like [`check_all`](Self::check_all), but raises an authorization
    /// error naming the missing slug (slug names are not secrets).
    pub fn require_all(&self, slugs: &[&str]) -> Result<(), AppError> {
        match self.check_all(slugs.iter().copied()) {
            AbilityCheck { allowed: true, .. } => Ok(()),
            AbilityCheck { missing, .. } => {
                let slug = missing.unwrap_or_default();
                Err(AppError::authorization(format!(
                    "Missing permission: {slug}"
                )))
            }
        }
    }
}
