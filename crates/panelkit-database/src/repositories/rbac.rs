//! Role/permission graph persistence over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use panelkit_auth::{AdminGrants, RbacStore};
use panelkit_core::error::{AppError, ErrorKind};
use panelkit_core::result::AppResult;
use panelkit_entity::permission::{CreatePermission, Permission, PermissionRef, UpdatePermission};
use panelkit_entity::role::{CreateRole, Role, RoleRef, UpdateRole};

use super::{PgStore, map_insert_error};

#[async_trait]
impl RbacStore for PgStore {
    async fn admin_grants(&self, admin_id: Uuid) -> AppResult<AdminGrants> {
        let roles = sqlx::query_as::<_, RoleRef>(
            "SELECT r.id, r.name, r.slug, r.display_name \
             FROM admin_roles ar \
             JOIN roles r ON r.id = ar.role_id \
             WHERE ar.admin_id = $1 AND r.is_deleted = FALSE AND r.is_active = TRUE \
             ORDER BY ar.created_at ASC",
        )
        .bind(admin_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch admin roles", e))?;

        let role_permissions = sqlx::query_as::<_, PermissionRef>(
            "SELECT p.id, p.slug, p.\"group\" \
             FROM admin_roles ar \
             JOIN roles r ON r.id = ar.role_id \
             JOIN role_permissions rp ON rp.role_id = r.id \
             JOIN permissions p ON p.id = rp.permission_id \
             WHERE ar.admin_id = $1 \
             AND r.is_deleted = FALSE AND r.is_active = TRUE \
             AND p.is_deleted = FALSE AND p.is_active = TRUE \
             ORDER BY ar.created_at ASC, rp.created_at ASC",
        )
        .bind(admin_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch role permissions", e)
        })?;

        let direct_permissions = sqlx::query_as::<_, PermissionRef>(
            "SELECT p.id, p.slug, p.\"group\" \
             FROM admin_permissions ap \
             JOIN permissions p ON p.id = ap.permission_id \
             WHERE ap.admin_id = $1 AND p.is_deleted = FALSE AND p.is_active = TRUE \
             ORDER BY ap.created_at ASC",
        )
        .bind(admin_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch direct permissions", e)
        })?;

        Ok(AdminGrants {
            roles,
            role_permissions,
            direct_permissions,
        })
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT * FROM roles WHERE is_deleted = FALSE AND is_active = TRUE \
             ORDER BY \"order\" ASC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }

    async fn find_role(&self, id: Uuid) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1 AND is_deleted = FALSE")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role", e))
    }

    async fn create_role(&self, data: &CreateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name, slug, display_name, description, is_default, \"order\") \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.display_name)
        .bind(&data.description)
        .bind(data.is_default)
        .bind(data.order)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            map_insert_error(e, "Role name or slug already in use", "Failed to create role")
        })
    }

    async fn update_role(&self, id: Uuid, data: &UpdateRole) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET \
               display_name = COALESCE($2, display_name), \
               description = COALESCE($3, description), \
               \"order\" = COALESCE($4, \"order\"), \
               is_active = COALESCE($5, is_active), \
               updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(&data.display_name)
        .bind(&data.description)
        .bind(data.order)
        .bind(data.is_active)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found("Role not found"))
    }

    async fn soft_delete_role(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE roles SET is_deleted = TRUE, deleted_at = $2, updated_at = $2 \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete role", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Role not found"));
        }
        Ok(())
    }

    async fn role_permissions(&self, role_id: Uuid) -> AppResult<Vec<PermissionRef>> {
        sqlx::query_as::<_, PermissionRef>(
            "SELECT p.id, p.slug, p.\"group\" \
             FROM role_permissions rp \
             JOIN permissions p ON p.id = rp.permission_id \
             WHERE rp.role_id = $1 AND p.is_deleted = FALSE AND p.is_active = TRUE \
             ORDER BY rp.created_at ASC",
        )
        .bind(role_id)
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list role permissions", e)
        })
    }

    async fn replace_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
    ) -> AppResult<()> {
        // Delete and re-insert under one transaction so readers never see a
        // partially replaced set.
        let mut tx = self.pool().begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(role_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear role permissions", e)
            })?;

        sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) \
             SELECT $1, unnest($2::uuid[])",
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to assign role permissions", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(())
    }

    async fn list_permissions(&self, group: Option<&str>) -> AppResult<Vec<Permission>> {
        sqlx::query_as::<_, Permission>(
            "SELECT * FROM permissions \
             WHERE is_deleted = FALSE AND is_active = TRUE \
             AND ($1::text IS NULL OR \"group\" = $1) \
             ORDER BY \"group\" ASC, group_order ASC, \"order\" ASC",
        )
        .bind(group)
        .fetch_all(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list permissions", e))
    }

    async fn create_permission(&self, data: &CreatePermission) -> AppResult<Permission> {
        sqlx::query_as::<_, Permission>(
            "INSERT INTO permissions (name, slug, display_name, \"group\", group_order, \"order\") \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.display_name)
        .bind(&data.group)
        .bind(data.group_order)
        .bind(data.order)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                "Permission slug already in use",
                "Failed to create permission",
            )
        })
    }

    async fn update_permission(&self, id: Uuid, data: &UpdatePermission) -> AppResult<Permission> {
        sqlx::query_as::<_, Permission>(
            "UPDATE permissions SET \
               display_name = COALESCE($2, display_name), \
               \"order\" = COALESCE($3, \"order\"), \
               group_order = COALESCE($4, group_order), \
               is_active = COALESCE($5, is_active), \
               updated_at = NOW() \
             WHERE id = $1 AND is_deleted = FALSE RETURNING *",
        )
        .bind(id)
        .bind(&data.display_name)
        .bind(data.order)
        .bind(data.group_order)
        .bind(data.is_active)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update permission", e))?
        .ok_or_else(|| AppError::not_found("Permission not found"))
    }

    async fn soft_delete_permission(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE permissions SET is_deleted = TRUE, deleted_at = $2, updated_at = $2 \
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete permission", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Permission not found"));
        }
        Ok(())
    }

    async fn default_role(&self) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>(
            "SELECT * FROM roles \
             WHERE is_default = TRUE AND is_deleted = FALSE AND is_active = TRUE \
             ORDER BY \"order\" ASC LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch default role", e))
    }

    async fn assign_role(&self, admin_id: Uuid, role_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO admin_roles (admin_id, role_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(admin_id)
        .bind(role_id)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign role", e))?;

        Ok(())
    }

    async fn grant_permission(&self, admin_id: Uuid, permission_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO admin_permissions (admin_id, permission_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(admin_id)
        .bind(permission_id)
        .execute(self.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to grant permission", e))?;

        Ok(())
    }
}
