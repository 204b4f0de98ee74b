//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access-token signing (HMAC-SHA256). Required.
    pub jwt_secret: String,
    /// Access-token lifetime spec, e.g. `"7d"`, `"12h"`, `"30m"`.
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl: String,
    /// Refresh-token lifetime spec. Stored alongside the session row;
    /// there is no exchange endpoint yet, so this only bounds retention.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl: String,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 lane count.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
    /// Minimum accepted password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl AuthConfig {
    /// Rejects configurations that would ship with an unusable or
    /// placeholder signing secret.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set to a non-empty value",
            ));
        }
        if self.hash_iterations == 0 || self.hash_parallelism == 0 {
            return Err(AppError::configuration(
                "auth hash cost parameters must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_access_ttl() -> String {
    "7d".to_string()
}

fn default_refresh_ttl() -> String {
    "30d".to_string()
}

fn default_hash_memory() -> u32 {
    19_456
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}

fn default_password_min() -> usize {
    6
}
