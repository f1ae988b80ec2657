//! In-process session cache.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::policy::Expiry;
use tracing::debug;

use crate::domain::entities::SessionUser;
use crate::domain::repositories::SessionCache;
use crate::error::AppError;

#[derive(Clone)]
struct SessionEntry {
    user: SessionUser,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct SessionExpiry;

impl Expiry<String, SessionEntry> for SessionExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &SessionEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &SessionEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-backed session cache for single-instance deployments.
///
/// Sessions do not survive a restart and are not shared between processes.
pub struct MemorySessionCache {
    inner: Cache<String, SessionEntry>,
}

impl MemorySessionCache {
    pub fn new(max_capacity: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(SessionExpiry)
            .build();

        debug!(max_capacity, "MemorySessionCache initialized");
        Self { inner }
    }
}

#[async_trait]
impl SessionCache for MemorySessionCache {
    async fn put(&self, key: &str, user: &SessionUser, ttl: Duration) -> Result<(), AppError> {
        let entry = SessionEntry {
            user: user.clone(),
            ttl,
        };
        self.inner.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<SessionUser>, AppError> {
        Ok(self.inner.get(key).await.map(|entry| entry.user))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            id: 1,
            display_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let cache = MemorySessionCache::new(100);

        cache
            .put("session:abc", &user(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("session:abc").await.unwrap(), Some(user()));

        cache.delete("session:abc").await.unwrap();
        assert_eq!(cache.get("session:abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let cache = MemorySessionCache::new(100);

        assert!(cache.delete("session:missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = MemorySessionCache::new(100);

        cache
            .put("session:short", &user(), Duration::from_millis(50))
            .await
            .unwrap();
        cache
            .put("session:long", &user(), Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.get("session:short").await.unwrap(), None);
        assert_eq!(cache.get("session:long").await.unwrap(), Some(user()));
    }
}
