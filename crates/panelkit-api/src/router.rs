//! Route definitions for the PanelKit HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(user_auth_routes())
        .merge(admin_auth_routes())
        .merge(role_routes())
        .merge(permission_routes())
        .merge(admin_account_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::request_id::request_context,
        ))
        .with_state(state)
}

/// User-domain auth endpoints (no permission system).
fn user_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(handlers::auth::sign_up))
        .route("/auth/sign-in", post(handlers::auth::sign_in))
        .route("/auth/sign-out", post(handlers::auth::sign_out))
        .route("/auth/me", get(handlers::auth::me))
}

/// Admin-domain auth endpoints.
fn admin_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/auth/sign-in", post(handlers::admin::auth::sign_in))
        .route(
            "/admin/auth/sign-out",
            post(handlers::admin::auth::sign_out),
        )
        .route(
            "/admin/auth/register",
            post(handlers::admin::auth::register),
        )
        .route("/admin/auth/me", get(handlers::admin::auth::me))
}

/// Role management (permission-gated in the handlers).
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/roles", get(handlers::admin::roles::list))
        .route("/admin/roles", post(handlers::admin::roles::create))
        .route("/admin/roles/{id}", get(handlers::admin::roles::get))
        .route("/admin/roles/{id}", put(handlers::admin::roles::update))
        .route("/admin/roles/{id}", delete(handlers::admin::roles::delete))
        .route(
            "/admin/roles/{id}/permissions",
            get(handlers::admin::roles::permissions),
        )
        .route(
            "/admin/roles/{id}/permissions",
            put(handlers::admin::roles::replace_permissions),
        )
}

/// Permission catalog management (permission-gated in the handlers).
fn permission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/permissions",
            get(handlers::admin::permissions::list),
        )
        .route(
            "/admin/permissions",
            post(handlers::admin::permissions::create),
        )
        .route(
            "/admin/permissions/{id}",
            put(handlers::admin::permissions::update),
        )
        .route(
            "/admin/permissions/{id}",
            delete(handlers::admin::permissions::delete),
        )
}

/// Admin account administration.
fn admin_account_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/admins/{id}/revoke-sessions",
        post(handlers::admin::admins::revoke_sessions),
    )
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let origins = &state.config.server.cors_allowed_origins;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors = cors.allow_origin(parsed);
    }

    cors
}
