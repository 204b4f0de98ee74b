//! Claims embedded in signed access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use panelkit_entity::principal::PrincipalKind;

/// Payload of a signed access token.
///
/// Signature verification rejects forged tokens without a store lookup;
/// the session row is still consulted afterwards because a signature alone
/// cannot be revoked before its natural expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the principal ID.
    pub sub: Uuid,
    /// Principal email at the time of issuance.
    pub email: String,
    /// Which identity domain the token belongs to.
    pub kind: PrincipalKind,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID, unique per issuance.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the principal ID from the subject claim.
    pub fn principal_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
