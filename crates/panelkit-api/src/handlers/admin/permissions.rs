//! Permission catalog management handlers. Every route is permission-gated.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use panelkit_entity::permission::{CreatePermission, Permission, UpdatePermission};

use crate::dto::request::{CreatePermissionRequest, ListPermissionsQuery, UpdatePermissionRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AdminContext, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin/permissions
///
/// Ordered by (group, group_order, order); `?group=` narrows to one group.
pub async fn list(
    State(state): State<AppState>,
    ctx: AdminContext,
    Query(query): Query<ListPermissionsQuery>,
) -> Result<Json<ApiResponse<Vec<Permission>>>, ApiError> {
    ctx.ability.require_all(&["permissions.list"])?;

    let permissions = state.rbac.list_permissions(query.group.as_deref()).await?;
    Ok(Json(ApiResponse::ok(permissions)))
}

/// POST /api/admin/permissions
pub async fn create(
    State(state): State<AppState>,
    ctx: AdminContext,
    ValidatedJson(req): ValidatedJson<CreatePermissionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Permission>>), ApiError> {
    ctx.ability.require_all(&["permissions.create"])?;

    let permission = state
        .rbac
        .create_permission(&CreatePermission {
            name: req.name,
            slug: req.slug,
            display_name: req.display_name,
            group: req.group,
            group_order: req.group_order,
            order: req.order,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(permission))))
}

/// PUT /api/admin/permissions/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdatePermissionRequest>,
) -> Result<Json<ApiResponse<Permission>>, ApiError> {
    ctx.ability.require_all(&["permissions.update"])?;

    let permission = state
        .rbac
        .update_permission(
            id,
            &UpdatePermission {
                display_name: req.display_name,
                order: req.order,
                group_order: req.group_order,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(permission)))
}

/// DELETE /api/admin/permissions/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    ctx.ability.require_all(&["permissions.delete"])?;

    state.rbac.soft_delete_permission(id, Utc::now()).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Permission deleted",
    ))))
}
