//! User-domain auth handlers — sign-up, sign-in, sign-out, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use panelkit_core::error::AppError;
use panelkit_entity::principal::PrincipalKind;
use panelkit_entity::user::User;

use crate::dto::request::{SignInRequest, SignUpRequest};
use crate::dto::response::{ApiResponse, MessageResponse, UserAuthResponse};
use crate::error::ApiError;
use crate::extractors::{ClientInfo, UserContext, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    enforce_password_policy(&state, &req.password)?;

    let user = state
        .session_manager
        .sign_up_user(&req.email, &req.password, req.first_name, req.last_name)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// POST /api/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    ClientInfo(meta): ClientInfo,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<Json<ApiResponse<UserAuthResponse>>, ApiError> {
    let (user, issued) = state
        .session_manager
        .sign_in_user(&req.email, &req.password, meta)
        .await?;

    Ok(Json(ApiResponse::ok(UserAuthResponse {
        access_token: issued.access_token,
        refresh_token: issued.refresh_token,
        expires_at: issued.expires_at,
        user,
    })))
}

/// POST /api/auth/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    ctx: UserContext,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .session_manager
        .revoke_session(&ctx.token, PrincipalKind::User, Some(ctx.user.id))
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Signed out successfully",
    ))))
}

/// GET /api/auth/me
pub async fn me(ctx: UserContext) -> Json<ApiResponse<User>> {
    Json(ApiResponse::ok(ctx.user))
}

/// Rejects passwords shorter than the configured minimum. The DTO enforces
/// a static floor; deployments may configure a stricter one.
pub(crate) fn enforce_password_policy(state: &AppState, password: &str) -> Result<(), AppError> {
    let min = state.config.auth.password_min_length;
    if password.chars().count() < min {
        return Err(AppError::validation(format!(
            "Password must be at least {min} characters"
        )));
    }
    Ok(())
}
