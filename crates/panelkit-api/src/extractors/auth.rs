//! Principal-context extractors — pull the bearer token from the
//! Authorization header, validate the session, and inject the caller.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use panelkit_auth::{Ability, ResolvedGrants};
use panelkit_core::error::AppError;
use panelkit_entity::admin::Admin;
use panelkit_entity::principal::PrincipalKind;
use panelkit_entity::session::{ClientMeta, Session};
use panelkit_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin caller with resolved authorization state.
///
/// Extraction validates the session against the admin table and resolves
/// the effective permission set fresh on every request — a permission
/// change takes effect on the caller's next request.
#[derive(Debug, Clone)]
pub struct AdminContext {
    /// The authenticated admin.
    pub admin: Admin,
    /// The validated session row.
    pub session: Session,
    /// Resolved roles and permissions.
    pub grants: ResolvedGrants,
    /// The queryable authorization view.
    pub ability: Ability,
    /// The raw bearer token (needed for sign-out).
    pub token: String,
}

/// Authenticated end-user caller. Users carry no permission system.
#[derive(Debug, Clone)]
pub struct UserContext {
    /// The authenticated user.
    pub user: User,
    /// The validated session row.
    pub session: Session,
    /// The raw bearer token (needed for sign-out).
    pub token: String,
}

impl FromRequestParts<AppState> for AdminContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let session = state
            .session_manager
            .validate_session(&token, PrincipalKind::Admin)
            .await?;

        let admin = state
            .principals
            .find_admin_by_id(session.principal_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account has been deleted"))?;

        let grants = state.permission_resolver.resolve(admin.id).await?;
        let ability = Ability::from_grants(&grants);

        Ok(Self {
            admin,
            session,
            grants,
            ability,
            token,
        })
    }
}

impl FromRequestParts<AppState> for UserContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let session = state
            .session_manager
            .validate_session(&token, PrincipalKind::User)
            .await?;

        let user = state
            .principals
            .find_user_by_id(session.principal_id)
            .await?
            .ok_or_else(|| AppError::authentication("Account has been deleted"))?;

        Ok(Self {
            user,
            session,
            token,
        })
    }
}

/// Client metadata recorded on sign-in (audit only). Infallible.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo(pub ClientMeta);

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string());

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(Self(ClientMeta {
            ip_address,
            user_agent,
        }))
    }
}

/// Extracts the bearer token, rejecting before any store lookup.
fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    if token.is_empty() {
        return Err(AppError::authentication(
            "Invalid Authorization header format",
        ));
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn rejects_missing_header() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.message, "Missing Authorization header");
    }

    #[test]
    fn rejects_non_bearer_schemes() {
        assert!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers_with("Bearer ")).is_err());
        assert!(bearer_token(&headers_with("abc123")).is_err());
    }
}
