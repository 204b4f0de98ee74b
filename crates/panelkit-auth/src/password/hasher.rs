//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use panelkit_core::config::AuthConfig;
use panelkit_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
///
/// Cost parameters come from [`AuthConfig`] so the work factor can be tuned
/// per deployment. Plaintext never leaves this module and is never logged.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Tuned Argon2 cost parameters.
    params: Params,
    /// A real hash of a throwaway value, verified against when the account
    /// lookup misses so the response time matches the found-account path.
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher with cost parameters from configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        let dummy_hash = hash_with_params(&params, "panelkit-dummy-credential")?;

        Ok(Self { params, dummy_hash })
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_with_params(&self.params, password)
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Burns the same work as a real verification and always fails.
    ///
    /// Called when the email lookup misses (or the account has no password)
    /// so "no such account" and "wrong password" are indistinguishable in
    /// timing at the sign-in call site.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

fn hash_with_params(params: &Params, password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone());

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> PasswordHasher {
        // Low-cost parameters to keep the test suite fast.
        let config = AuthConfig {
            jwt_secret: "test-secret".to_string(),
            access_token_ttl: "7d".to_string(),
            refresh_token_ttl: "30d".to_string(),
            hash_memory_kib: 8,
            hash_iterations: 1,
            hash_parallelism: 1,
            password_min_length: 6,
        };
        PasswordHasher::new(&config).expect("hasher")
    }

    #[test]
    fn round_trip_verifies() {
        let hasher = test_hasher();
        let hash = hasher.hash("password123").unwrap();

        assert_ne!(hash, "password123");
        assert!(hasher.verify("password123", &hash).unwrap());
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = test_hasher();
        let first = hasher.hash("password123").unwrap();
        let second = hasher.hash("password123").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn dummy_verification_always_fails() {
        let hasher = test_hasher();
        assert!(!hasher.verify_dummy("password123"));
    }
}
