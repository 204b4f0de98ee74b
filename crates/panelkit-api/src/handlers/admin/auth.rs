//! Admin-domain auth handlers — sign-in, sign-out, register, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use panelkit_entity::admin::Admin;
use panelkit_entity::principal::PrincipalKind;

use crate::dto::request::{SignInRequest, SignUpRequest};
use crate::dto::response::{AdminAuthResponse, AdminProfileResponse, ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AdminContext, ClientInfo, ValidatedJson};
use crate::handlers::auth::enforce_password_policy;
use crate::state::AppState;

/// POST /api/admin/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    ClientInfo(meta): ClientInfo,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<Json<ApiResponse<AdminAuthResponse>>, ApiError> {
    let (admin, issued) = state
        .session_manager
        .sign_in_admin(&req.email, &req.password, meta)
        .await?;

    Ok(Json(ApiResponse::ok(AdminAuthResponse {
        access_token: issued.access_token,
        refresh_token: issued.refresh_token,
        expires_at: issued.expires_at,
        admin,
    })))
}

/// POST /api/admin/auth/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    ctx: AdminContext,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .session_manager
        .revoke_session(&ctx.token, PrincipalKind::Admin, Some(ctx.admin.id))
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Signed out successfully",
    ))))
}

/// POST /api/admin/auth/register
///
/// Creates a new admin account on behalf of the caller and auto-assigns
/// the default role, if one is configured.
pub async fn register(
    State(state): State<AppState>,
    ctx: AdminContext,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Admin>>), ApiError> {
    ctx.ability.require_all(&["admins.create"])?;
    enforce_password_policy(&state, &req.password)?;

    let admin = state
        .session_manager
        .register_admin(
            &req.email,
            &req.password,
            req.first_name,
            req.last_name,
            Some(ctx.admin.id),
        )
        .await?;

    if let Some(role) = state.rbac.default_role().await? {
        state.rbac.assign_role(admin.id, role.id).await?;
        info!(admin_id = %admin.id, role = %role.slug, "Default role assigned");
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(admin))))
}

/// GET /api/admin/auth/me
pub async fn me(ctx: AdminContext) -> Json<ApiResponse<AdminProfileResponse>> {
    let is_super_admin = ctx.ability.is_superuser();
    let permissions = ctx.grants.slugs();

    Json(ApiResponse::ok(AdminProfileResponse {
        admin: ctx.admin,
        roles: ctx.grants.roles,
        permissions,
        is_super_admin,
    }))
}
