//! Concrete PostgreSQL implementations of the auth store traits.
//!
//! One `PgStore` implements all three seams; the trait impls are split
//! across the submodules by concern.

mod principals;
mod rbac;
mod sessions;

use sqlx::PgPool;

use panelkit_core::error::{AppError, ErrorKind};
use panelkit_entity::principal::PrincipalKind;

/// PostgreSQL-backed store for sessions, principals, and the RBAC graph.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Admin and user sessions live in separate tables with identical shapes.
pub(crate) fn sessions_table(kind: PrincipalKind) -> &'static str {
    match kind {
        PrincipalKind::Admin => "admin_sessions",
        PrincipalKind::User => "user_sessions",
    }
}

/// Maps an insert failure, turning a unique violation into a conflict with
/// a caller-facing message.
pub(crate) fn map_insert_error(
    e: sqlx::Error,
    conflict_message: &str,
    context: &'static str,
) -> AppError {
    if e.as_database_error()
        .is_some_and(|d| d.is_unique_violation())
    {
        AppError::conflict(conflict_message)
    } else {
        AppError::with_source(ErrorKind::Database, context, e)
    }
}
