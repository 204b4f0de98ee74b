//! Admin account administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use panelkit_core::error::AppError;
use panelkit_entity::principal::PrincipalKind;

use crate::dto::response::{ApiResponse, RevokeSessionsResponse};
use crate::error::ApiError;
use crate::extractors::AdminContext;
use crate::state::AppState;

/// POST /api/admin/admins/{id}/revoke-sessions
///
/// Signs the target admin out everywhere. The target's next request on
/// any session fails validation immediately.
pub async fn revoke_sessions(
    State(state): State<AppState>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RevokeSessionsResponse>>, ApiError> {
    ctx.ability.require_all(&["admins.update"])?;

    state
        .principals
        .find_admin_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Admin not found"))?;

    let revoked = state
        .session_manager
        .revoke_all_sessions(id, PrincipalKind::Admin, Some(ctx.admin.id))
        .await?;

    Ok(Json(ApiResponse::ok(RevokeSessionsResponse { revoked })))
}
