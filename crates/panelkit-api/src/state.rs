//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use panelkit_auth::{
    PasswordHasher, PermissionResolver, PrincipalStore, RbacStore, SessionManager, SessionStore,
    TokenIssuer,
};
use panelkit_core::config::AppConfig;
use panelkit_core::result::AppResult;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; the stores are trait
/// objects so the same router serves Postgres and the in-memory store.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Effective-permission resolver.
    pub permission_resolver: Arc<PermissionResolver>,
    /// Role/permission graph store.
    pub rbac: Arc<dyn RbacStore>,
    /// Principal account store.
    pub principals: Arc<dyn PrincipalStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}

impl AppState {
    /// Wires the full state from configuration and the three store seams.
    ///
    /// Builds the token issuer and password hasher once; a bad signing
    /// secret or hash cost fails here, at startup, not per request.
    pub fn build(
        config: Arc<AppConfig>,
        sessions: Arc<dyn SessionStore>,
        principals: Arc<dyn PrincipalStore>,
        rbac: Arc<dyn RbacStore>,
    ) -> AppResult<Self> {
        let issuer = Arc::new(TokenIssuer::new(&config.auth)?);
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);

        let session_manager = Arc::new(SessionManager::new(
            issuer,
            hasher,
            sessions,
            Arc::clone(&principals),
        ));
        let permission_resolver = Arc::new(PermissionResolver::new(Arc::clone(&rbac)));

        Ok(Self {
            config,
            session_manager,
            permission_resolver,
            rbac,
            principals,
        })
    }
}
