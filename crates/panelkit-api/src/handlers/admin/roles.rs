//! Role management handlers. Every route is permission-gated.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use panelkit_core::error::AppError;
use panelkit_entity::permission::PermissionRef;
use panelkit_entity::role::{CreateRole, Role, UpdateRole};

use crate::dto::request::{CreateRoleRequest, ReplaceRolePermissionsRequest, UpdateRoleRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AdminContext, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin/roles
pub async fn list(
    State(state): State<AppState>,
    ctx: AdminContext,
) -> Result<Json<ApiResponse<Vec<Role>>>, ApiError> {
    ctx.ability.require_all(&["roles.list"])?;

    let roles = state.rbac.list_roles().await?;
    Ok(Json(ApiResponse::ok(roles)))
}

/// GET /api/admin/roles/{id}
pub async fn get(
    State(state): State<AppState>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Role>>, ApiError> {
    ctx.ability.require_all(&["roles.read"])?;

    let role = state
        .rbac
        .find_role(id)
        .await?
        .ok_or_else(|| AppError::not_found("Role not found"))?;

    Ok(Json(ApiResponse::ok(role)))
}

/// POST /api/admin/roles
pub async fn create(
    State(state): State<AppState>,
    ctx: AdminContext,
    ValidatedJson(req): ValidatedJson<CreateRoleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Role>>), ApiError> {
    ctx.ability.require_all(&["roles.create"])?;

    let role = state
        .rbac
        .create_role(&CreateRole {
            name: req.name,
            slug: req.slug,
            display_name: req.display_name,
            description: req.description,
            is_default: req.is_default,
            order: req.order,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(role))))
}

/// PUT /api/admin/roles/{id}
pub async fn update(
    State(state): State<AppState>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<Role>>, ApiError> {
    ctx.ability.require_all(&["roles.update"])?;

    let role = state
        .rbac
        .update_role(
            id,
            &UpdateRole {
                display_name: req.display_name,
                description: req.description,
                order: req.order,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(role)))
}

/// DELETE /api/admin/roles/{id}
pub async fn delete(
    State(state): State<AppState>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    ctx.ability.require_all(&["roles.delete"])?;

    state.rbac.soft_delete_role(id, Utc::now()).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Role deleted"))))
}

/// GET /api/admin/roles/{id}/permissions
pub async fn permissions(
    State(state): State<AppState>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<PermissionRef>>>, ApiError> {
    ctx.ability.require_all(&["roles.read"])?;

    ensure_role_exists(&state, id).await?;
    let permissions = state.rbac.role_permissions(id).await?;

    Ok(Json(ApiResponse::ok(permissions)))
}

/// PUT /api/admin/roles/{id}/permissions
///
/// Replace-not-merge: the submitted list becomes the role's entire grant
/// set; an empty list clears it.
pub async fn replace_permissions(
    State(state): State<AppState>,
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    Json(req): Json<ReplaceRolePermissionsRequest>,
) -> Result<Json<ApiResponse<Vec<PermissionRef>>>, ApiError> {
    ctx.ability.require_all(&["roles.update"])?;

    ensure_role_exists(&state, id).await?;
    state
        .rbac
        .replace_role_permissions(id, &req.permission_ids)
        .await?;

    let permissions = state.rbac.role_permissions(id).await?;
    Ok(Json(ApiResponse::ok(permissions)))
}

async fn ensure_role_exists(state: &AppState, id: Uuid) -> Result<(), AppError> {
    state
        .rbac
        .find_role(id)
        .await?
        .ok_or_else(|| AppError::not_found("Role not found"))?;
    Ok(())
}
