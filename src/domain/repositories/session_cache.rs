//! Session cache trait.

use std::time::Duration;

use crate::domain::entities::SessionUser;
use crate::error::AppError;
use async_trait::async_trait;

/// TTL-bounded mapping from a session key to an identity snapshot.
///
/// Entries expire on their own after the TTL given to [`SessionCache::put`];
/// reads never extend the lifetime.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::RedisSessionCache`] - Redis `SET EX`
/// - [`crate::infrastructure::session::MemorySessionCache`] - in-process moka cache
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Stores `user` under `key`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backend is unreachable.
    async fn put(&self, key: &str, user: &SessionUser, ttl: Duration) -> Result<(), AppError>;

    /// Returns the snapshot stored under `key`, or `None` if absent or expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backend is unreachable.
    async fn get(&self, key: &str) -> Result<Option<SessionUser>, AppError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backend is unreachable.
    async fn delete(&self, key: &str) -> Result<(), AppError>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
