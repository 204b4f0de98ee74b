//! Typed session-validation failures.

use panelkit_core::error::AppError;
use thiserror::Error;

/// Why a bearer token failed validation.
///
/// Checks run in a fixed order — token signature, row existence, revocation,
/// expiry, account status — and the first failing check determines the
/// variant. All variants map to the `Authentication` error kind at the API
/// boundary; the distinction exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionRejection {
    /// Bad signature, malformed structure, or embedded expiry lapsed.
    #[error("Invalid or expired token")]
    InvalidToken,
    /// No session row matches the presented token.
    #[error("Session not found")]
    NotFound,
    /// The session was explicitly revoked.
    #[error("Session has been revoked")]
    Revoked,
    /// The session is past its hard expiry.
    #[error("Session has expired")]
    Expired,
    /// The owning account is deactivated.
    #[error("Account is not active")]
    PrincipalInactive,
    /// The owning account is soft-deleted.
    #[error("Account has been deleted")]
    PrincipalDeleted,
}

impl From<SessionRejection> for AppError {
    fn from(rejection: SessionRejection) -> Self {
        AppError::authentication(rejection.to_string())
    }
}
