//! One-way password hashing capability.

use crate::error::AppError;

/// Hashes secrets and verifies them against stored hashes.
///
/// Implementations are CPU-bound and synchronous; async callers should run
/// them on a blocking thread.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produces a self-describing hash (algorithm, parameters and salt included).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the hashing backend fails.
    fn hash(&self, secret: &str) -> Result<String, AppError>;

    /// Returns `true` if `secret` matches `hash`. Malformed hashes never match.
    fn verify(&self, secret: &str, hash: &str) -> bool;
}
