//! Admin and user account persistence over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use panelkit_auth::PrincipalStore;
use panelkit_core::error::{AppError, ErrorKind};
use panelkit_core::result::AppResult;
use panelkit_entity::admin::{Admin, CreateAdmin};
use panelkit_entity::principal::{PrincipalFlags, PrincipalKind};
use panelkit_entity::user::{CreateUser, User};

use super::{PgStore, map_insert_error};

fn principals_table(kind: PrincipalKind) -> &'static str {
    match kind {
        PrincipalKind::Admin => "admins",
        PrincipalKind::User => "users",
    }
}

#[async_trait]
impl PrincipalStore for PgStore {
    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find admin by email", e)
            })
    }

    async fn find_admin_by_id(&self, id: Uuid) -> AppResult<Option<Admin>> {
        sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find admin", e))
    }

    async fn insert_admin(&self, data: &CreateAdmin) -> AppResult<Admin> {
        sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (email, password_hash, first_name, last_name, created_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.created_by)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_insert_error(e, "Email already in use", "Failed to insert admin"))
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    async fn insert_user(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .fetch_one(self.pool())
        .await
        .map_err(|e| map_insert_error(e, "Email already in use", "Failed to insert user"))
    }

    async fn principal_flags(
        &self,
        kind: PrincipalKind,
        id: Uuid,
    ) -> AppResult<Option<PrincipalFlags>> {
        let query = format!(
            "SELECT is_active, is_deleted FROM {} WHERE id = $1",
            principals_table(kind)
        );

        sqlx::query_as::<_, PrincipalFlags>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch principal flags", e)
            })
    }

    async fn touch_last_login(
        &self,
        kind: PrincipalKind,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        let query = format!(
            "UPDATE {} SET last_login_at = $2, updated_at = $2 WHERE id = $1",
            principals_table(kind)
        );

        sqlx::query(&query)
            .bind(id)
            .bind(at)
            .execute(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;

        Ok(())
    }
}
