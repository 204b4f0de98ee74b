//! Signed access-token issuance and verification, opaque refresh tokens.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng as _;
use uuid::Uuid;

use panelkit_core::config::AuthConfig;
use panelkit_core::error::AppError;
use panelkit_entity::principal::PrincipalKind;

use crate::error::SessionRejection;

use super::claims::Claims;
use super::ttl::TtlSpec;

/// Bytes of entropy in a refresh token (384 bits).
const REFRESH_TOKEN_BYTES: usize = 48;

/// Creates and verifies access tokens and generates refresh tokens.
///
/// Built once at startup from [`AuthConfig`] and injected wherever tokens
/// are needed; the signing key is never a mutable global.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Access-token lifetime.
    access_ttl: TtlSpec,
    /// Refresh-token lifetime. Refresh exchange is not implemented; this
    /// only bounds how long the stored token stays meaningful.
    refresh_ttl: TtlSpec,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// A freshly signed access token with its absolute expiry.
#[derive(Debug, Clone)]
pub struct SignedAccessToken {
    /// The signed, tamper-evident token string.
    pub token: String,
    /// When the token (and the session row created with it) expires.
    pub expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Creates an issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: config.access_token_ttl.parse()?,
            refresh_ttl: config.refresh_token_ttl.parse()?,
        })
    }

    /// Signs a new access token for the given principal.
    pub fn issue_access_token(
        &self,
        principal_id: Uuid,
        email: &str,
        kind: PrincipalKind,
    ) -> Result<SignedAccessToken, AppError> {
        let now = Utc::now();
        let expires_at = self.access_ttl.expiry_from(now);

        let claims = Claims {
            sub: principal_id,
            email: email.to_string(),
            kind,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(SignedAccessToken { token, expires_at })
    }

    /// Generates a cryptographically random opaque refresh token.
    ///
    /// Unrelated to the access token's content and not decodable.
    pub fn issue_refresh_token(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Verifies an access token's signature and embedded expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, SessionRejection> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| SessionRejection::InvalidToken)
    }

    /// Absolute refresh-token expiry from the given instant.
    pub fn refresh_expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.refresh_ttl.expiry_from(now)
    }
}
