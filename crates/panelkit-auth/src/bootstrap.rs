//! First-run seeding.
//!
//! An RBAC system cannot mint its first privileged account through the API;
//! every admin-creating route is itself permission-gated. This routine
//! breaks that cycle at startup.

use tracing::info;

use panelkit_core::result::AppResult;
use panelkit_entity::admin::CreateAdmin;
use panelkit_entity::role::{CreateRole, SUPER_ADMIN};

use crate::password::PasswordHasher;
use crate::store::{PrincipalStore, RbacStore};

/// Ensures a superuser account exists, creating the reserved role and the
/// account as needed. Idempotent: an existing account with the given email
/// is left untouched, password included.
pub async fn ensure_super_admin(
    principals: &dyn PrincipalStore,
    rbac: &dyn RbacStore,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
) -> AppResult<()> {
    let admin = match principals.find_admin_by_email(email).await? {
        Some(existing) => {
            info!(email, "Bootstrap admin already exists");
            existing
        }
        None => {
            let password_hash = hasher.hash(password)?;
            let admin = principals
                .insert_admin(&CreateAdmin {
                    email: email.to_string(),
                    password_hash: Some(password_hash),
                    first_name: None,
                    last_name: None,
                    created_by: None,
                })
                .await?;
            info!(email, admin_id = %admin.id, "Bootstrap admin created");
            admin
        }
    };

    let role = match rbac
        .list_roles()
        .await?
        .into_iter()
        .find(|r| r.is_super_admin())
    {
        Some(role) => role,
        None => {
            let role = rbac
                .create_role(&CreateRole {
                    name: SUPER_ADMIN.to_string(),
                    slug: SUPER_ADMIN.to_string(),
                    display_name: "Super Admin".to_string(),
                    description: Some("Unrestricted access".to_string()),
                    is_default: false,
                    order: 0,
                })
                .await?;
            info!(role_id = %role.id, "Superuser role created");
            role
        }
    };

    rbac.assign_role(admin.id, role.id).await?;
    Ok(())
}
