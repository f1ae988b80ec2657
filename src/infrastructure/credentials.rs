//! Argon2id password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use serde_json::json;

use crate::domain::credentials::CredentialHasher;
use crate::error::AppError;

const SALT_BYTES: usize = 16;

/// Hashes with Argon2id default parameters into a PHC string
/// (`$argon2id$v=19$...`), which carries its own salt and parameters.
#[derive(Default, Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> Result<String, AppError> {
        let mut salt_bytes = [0u8; SALT_BYTES];
        getrandom::fill(&mut salt_bytes).map_err(|e| {
            tracing::error!(error = %e, "OS random source unavailable");
            AppError::internal("Failed to hash password", json!({}))
        })?;

        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
            tracing::error!(error = %e, "Failed to encode salt");
            AppError::internal("Failed to hash password", json!({}))
        })?;

        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!(error = %e, "Argon2 hashing failed");
                AppError::internal("Failed to hash password", json!({}))
            })
    }

    /// Unparseable hashes verify as `false`.
    fn verify(&self, secret: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a PHC string");
                false
            }
        }
    }
}
