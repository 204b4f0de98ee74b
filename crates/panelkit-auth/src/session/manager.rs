//! Session lifecycle manager — sign-in, sign-out, validation, sweeping.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use panelkit_core::error::AppError;
use panelkit_core::result::AppResult;
use panelkit_entity::admin::{Admin, CreateAdmin};
use panelkit_entity::principal::{PrincipalFlags, PrincipalKind};
use panelkit_entity::session::{ClientMeta, Session};
use panelkit_entity::user::{CreateUser, User};

use crate::error::SessionRejection;
use crate::password::PasswordHasher;
use crate::store::{PrincipalStore, SessionStore};
use crate::token::TokenIssuer;

/// Tokens handed to the client after a successful sign-in.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedSession {
    /// Signed bearer access token.
    pub access_token: String,
    /// Opaque refresh token (stored, currently inert).
    pub refresh_token: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

/// Result of one expired-session sweep cycle.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct SweepOutcome {
    /// Admin session rows deleted.
    pub admin_sessions_deleted: u64,
    /// User session rows deleted.
    pub user_sessions_deleted: u64,
}

/// Manages the complete session lifecycle for both principal domains.
#[derive(Clone)]
pub struct SessionManager {
    /// Token signing and verification.
    issuer: Arc<TokenIssuer>,
    /// Password hashing.
    hasher: Arc<PasswordHasher>,
    /// Session persistence.
    sessions: Arc<dyn SessionStore>,
    /// Principal account persistence.
    principals: Arc<dyn PrincipalStore>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        issuer: Arc<TokenIssuer>,
        hasher: Arc<PasswordHasher>,
        sessions: Arc<dyn SessionStore>,
        principals: Arc<dyn PrincipalStore>,
    ) -> Self {
        Self {
            issuer,
            hasher,
            sessions,
            principals,
        }
    }

    /// Performs the admin sign-in flow: credential check, last-login update,
    /// session creation. The credential failure message never distinguishes
    /// "no such email" from "wrong password".
    pub async fn sign_in_admin(
        &self,
        email: &str,
        password: &str,
        meta: ClientMeta,
    ) -> AppResult<(Admin, IssuedSession)> {
        let admin = self.principals.find_admin_by_email(email).await?;

        let Some(admin) = admin else {
            self.burn_verification(password).await;
            return Err(invalid_credentials());
        };

        check_account(&admin.flags())?;
        self.verify_credentials(password, admin.password_hash.as_deref())
            .await?;

        let now = Utc::now();
        self.principals
            .touch_last_login(PrincipalKind::Admin, admin.id, now)
            .await?;

        let issued = self
            .create_session(admin.id, &admin.email, PrincipalKind::Admin, meta)
            .await?;

        info!(admin_id = %admin.id, "Admin signed in");
        Ok((admin, issued))
    }

    /// Performs the user sign-in flow. Same shape as the admin flow; users
    /// have no permission system.
    pub async fn sign_in_user(
        &self,
        email: &str,
        password: &str,
        meta: ClientMeta,
    ) -> AppResult<(User, IssuedSession)> {
        let user = self.principals.find_user_by_email(email).await?;

        let Some(user) = user else {
            self.burn_verification(password).await;
            return Err(invalid_credentials());
        };

        check_account(&user.flags())?;
        self.verify_credentials(password, user.password_hash.as_deref())
            .await?;

        let now = Utc::now();
        self.principals
            .touch_last_login(PrincipalKind::User, user.id, now)
            .await?;

        let issued = self
            .create_session(user.id, &user.email, PrincipalKind::User, meta)
            .await?;

        info!(user_id = %user.id, "User signed in");
        Ok((user, issued))
    }

    /// Registers a new user account. Duplicate emails surface as a generic
    /// conflict regardless of the existing account's status.
    pub async fn sign_up_user(
        &self,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> AppResult<User> {
        let password_hash = self.hash_password(password).await?;

        let user = self
            .principals
            .insert_user(&CreateUser {
                email: email.to_string(),
                password_hash: Some(password_hash),
                first_name,
                last_name,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Registers a new admin account on behalf of `created_by`.
    pub async fn register_admin(
        &self,
        email: &str,
        password: &str,
        first_name: Option<String>,
        last_name: Option<String>,
        created_by: Option<Uuid>,
    ) -> AppResult<Admin> {
        let password_hash = self.hash_password(password).await?;

        let admin = self
            .principals
            .insert_admin(&CreateAdmin {
                email: email.to_string(),
                password_hash: Some(password_hash),
                first_name,
                last_name,
                created_by,
            })
            .await?;

        info!(admin_id = %admin.id, "Admin registered");
        Ok(admin)
    }

    /// Creates one session row and issues its token pair.
    ///
    /// A single insert; concurrent sign-ins for the same principal create
    /// independent rows (multi-device login is intentional).
    pub async fn create_session(
        &self,
        principal_id: Uuid,
        email: &str,
        kind: PrincipalKind,
        meta: ClientMeta,
    ) -> AppResult<IssuedSession> {
        let signed = self.issuer.issue_access_token(principal_id, email, kind)?;
        let refresh_token = self.issuer.issue_refresh_token();

        let session = Session {
            id: Uuid::new_v4(),
            principal_id,
            token: signed.token.clone(),
            refresh_token: refresh_token.clone(),
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
            expires_at: signed.expires_at,
            is_revoked: false,
            revoked_at: None,
            revoked_by: None,
            created_at: Utc::now(),
        };

        self.sessions.insert(kind, &session).await?;

        Ok(IssuedSession {
            access_token: signed.token,
            refresh_token,
            expires_at: signed.expires_at,
        })
    }

    /// Validates a bearer token against the session store.
    ///
    /// Signature first (rejects forgeries without a store hit), then the
    /// session row: existence, revocation, expiry, account status — in that
    /// order, every call. No validity caching.
    pub async fn validate_session(&self, token: &str, kind: PrincipalKind) -> AppResult<Session> {
        self.issuer.verify(token)?;

        let session = self.sessions.find_by_token(kind, token).await?;
        let session = session.ok_or(SessionRejection::NotFound)?;

        let flags = self
            .principals
            .principal_flags(kind, session.principal_id)
            .await?;

        evaluate_session(&session, flags, Utc::now())?;
        Ok(session)
    }

    /// Revokes the session identified by `token`. Idempotent: revoking an
    /// already-revoked (or unknown) token is not an error.
    pub async fn revoke_session(
        &self,
        token: &str,
        kind: PrincipalKind,
        revoked_by: Option<Uuid>,
    ) -> AppResult<()> {
        self.sessions
            .revoke(kind, token, revoked_by, Utc::now())
            .await?;
        Ok(())
    }

    /// Revokes every active session of one principal ("sign out
    /// everywhere"). Returns the number of sessions revoked.
    pub async fn revoke_all_sessions(
        &self,
        principal_id: Uuid,
        kind: PrincipalKind,
        revoked_by: Option<Uuid>,
    ) -> AppResult<u64> {
        let revoked = self
            .sessions
            .revoke_all_for(kind, principal_id, revoked_by, Utc::now())
            .await?;

        info!(principal_id = %principal_id, kind = %kind, revoked, "Bulk session revocation");
        Ok(revoked)
    }

    /// Deletes expired and revoked session rows in both domains.
    ///
    /// Maintenance-path only; never called during request handling.
    pub async fn sweep_expired(&self) -> AppResult<SweepOutcome> {
        let now = Utc::now();

        let admin_sessions_deleted = self.sessions.delete_dead(PrincipalKind::Admin, now).await?;
        let user_sessions_deleted = self.sessions.delete_dead(PrincipalKind::User, now).await?;

        Ok(SweepOutcome {
            admin_sessions_deleted,
            user_sessions_deleted,
        })
    }

    /// Verifies a password against a stored hash, treating a missing hash
    /// (social-only account) as a normal mismatch after burning equivalent
    /// work.
    async fn verify_credentials(&self, password: &str, stored: Option<&str>) -> AppResult<()> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let stored = stored.map(String::from);

        // Argon2 is deliberately CPU-heavy; keep it off the async executor.
        let valid = tokio::task::spawn_blocking(move || match stored {
            Some(hash) => hasher.verify(&password, &hash),
            None => Ok(hasher.verify_dummy(&password)),
        })
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))??;

        if valid {
            Ok(())
        } else {
            warn!("Credential verification failed");
            Err(invalid_credentials())
        }
    }

    /// Burns hash-verification work for a nonexistent account so the
    /// response time matches the account-found path.
    async fn burn_verification(&self, password: &str) {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();

        let _ = tokio::task::spawn_blocking(move || hasher.verify_dummy(&password)).await;
    }

    /// Hashes a new password off the async executor.
    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }
}

/// The session-validity predicate, applied in deterministic order:
/// revoked → expired → account active → account not deleted. (Existence is
/// checked by the caller before the row reaches this function; a missing
/// principal row counts as deleted.)
pub fn evaluate_session(
    session: &Session,
    flags: Option<PrincipalFlags>,
    now: DateTime<Utc>,
) -> Result<(), SessionRejection> {
    if session.is_revoked {
        return Err(SessionRejection::Revoked);
    }
    if session.expires_at <= now {
        return Err(SessionRejection::Expired);
    }

    let Some(flags) = flags else {
        return Err(SessionRejection::PrincipalDeleted);
    };
    if !flags.is_active {
        return Err(SessionRejection::PrincipalInactive);
    }
    if flags.is_deleted {
        return Err(SessionRejection::PrincipalDeleted);
    }

    Ok(())
}

fn invalid_credentials() -> AppError {
    AppError::authentication("Invalid credentials")
}

fn check_account(flags: &PrincipalFlags) -> AppResult<()> {
    if flags.is_deleted {
        return Err(AppError::authentication("Account has been deleted"));
    }
    if !flags.is_active {
        return Err(AppError::authentication("Account is not active"));
    }
    Ok(())
}
