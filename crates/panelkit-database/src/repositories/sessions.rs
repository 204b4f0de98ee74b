//! Session persistence over PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use panelkit_auth::SessionStore;
use panelkit_core::error::{AppError, ErrorKind};
use panelkit_core::result::AppResult;
use panelkit_entity::principal::PrincipalKind;
use panelkit_entity::session::Session;

use super::{PgStore, map_insert_error, sessions_table};

#[async_trait]
impl SessionStore for PgStore {
    async fn insert(&self, kind: PrincipalKind, session: &Session) -> AppResult<()> {
        let query = format!(
            "INSERT INTO {} (id, principal_id, token, refresh_token, ip_address, user_agent, \
             expires_at, is_revoked, revoked_at, revoked_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            sessions_table(kind)
        );

        sqlx::query(&query)
            .bind(session.id)
            .bind(session.principal_id)
            .bind(&session.token)
            .bind(&session.refresh_token)
            .bind(&session.ip_address)
            .bind(&session.user_agent)
            .bind(session.expires_at)
            .bind(session.is_revoked)
            .bind(session.revoked_at)
            .bind(session.revoked_by)
            .bind(session.created_at)
            .execute(self.pool())
            .await
            .map_err(|e| {
                map_insert_error(e, "Duplicate session token", "Failed to insert session")
            })?;

        Ok(())
    }

    async fn find_by_token(&self, kind: PrincipalKind, token: &str) -> AppResult<Option<Session>> {
        let query = format!("SELECT * FROM {} WHERE token = $1", sessions_table(kind));

        sqlx::query_as::<_, Session>(&query)
            .bind(token)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
            })
    }

    async fn revoke(
        &self,
        kind: PrincipalKind,
        token: &str,
        revoked_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let query = format!(
            "UPDATE {} SET is_revoked = TRUE, revoked_at = $2, revoked_by = $3 \
             WHERE token = $1 AND is_revoked = FALSE",
            sessions_table(kind)
        );

        let result = sqlx::query(&query)
            .bind(token)
            .bind(now)
            .bind(revoked_by)
            .execute(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke session", e)
            })?;

        Ok(result.rows_affected())
    }

    async fn revoke_all_for(
        &self,
        kind: PrincipalKind,
        principal_id: Uuid,
        revoked_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let query = format!(
            "UPDATE {} SET is_revoked = TRUE, revoked_at = $2, revoked_by = $3 \
             WHERE principal_id = $1 AND is_revoked = FALSE",
            sessions_table(kind)
        );

        let result = sqlx::query(&query)
            .bind(principal_id)
            .bind(now)
            .bind(revoked_by)
            .execute(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke principal sessions", e)
            })?;

        Ok(result.rows_affected())
    }

    async fn delete_dead(&self, kind: PrincipalKind, now: DateTime<Utc>) -> AppResult<u64> {
        let query = format!(
            "DELETE FROM {} WHERE expires_at < $1 OR is_revoked = TRUE",
            sessions_table(kind)
        );

        let result = sqlx::query(&query)
            .bind(now)
            .execute(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete dead sessions", e)
            })?;

        Ok(result.rows_affected())
    }

    async fn find_active_for(
        &self,
        kind: PrincipalKind,
        principal_id: Uuid,
    ) -> AppResult<Vec<Session>> {
        let query = format!(
            "SELECT * FROM {} WHERE principal_id = $1 AND is_revoked = FALSE AND expires_at > $2 \
             ORDER BY created_at DESC",
            sessions_table(kind)
        );

        sqlx::query_as::<_, Session>(&query)
            .bind(principal_id)
            .bind(Utc::now())
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find active sessions", e)
            })
    }
}
