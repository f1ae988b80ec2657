//! Redis-backed session cache.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::entities::SessionUser;
use crate::domain::repositories::SessionCache;
use crate::error::AppError;

/// Stores session snapshots as JSON strings with `SET EX`.
///
/// Unlike a read-through cache, sessions have no fallback store: every Redis
/// error is surfaced as [`AppError::Internal`].
pub struct RedisSessionCache {
    client: ConnectionManager,
}

impl RedisSessionCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`redis::RedisError`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> redis::RedisResult<Self> {
        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("✓ Connected to Redis session store");

        Ok(Self { client: manager })
    }

    fn store_error(op: &str, e: redis::RedisError) -> AppError {
        error!(op, error = %e, "Redis session store error");
        AppError::internal("Session store error", json!({}))
    }
}

#[async_trait]
impl SessionCache for RedisSessionCache {
    async fn put(&self, key: &str, user: &SessionUser, ttl: Duration) -> Result<(), AppError> {
        let payload = serde_json::to_string(user).map_err(|e| {
            error!(error = %e, "Failed to serialize session");
            AppError::internal("Session store error", json!({}))
        })?;

        let mut conn = self.client.clone();
        conn.set_ex::<_, _, ()>(key, payload, ttl.as_secs().max(1))
            .await
            .map_err(|e| Self::store_error("SET", e))?;

        debug!(user_id = user.id, ttl_secs = ttl.as_secs(), "Session stored");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<SessionUser>, AppError> {
        let mut conn = self.client.clone();
        let payload: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| Self::store_error("GET", e))?;

        match payload {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(user) => Ok(Some(user)),
                Err(e) => {
                    // Unreadable entries are treated as absent.
                    error!(error = %e, "Corrupt session entry");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let mut conn = self.client.clone();
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| Self::store_error("DEL", e))?;

        if deleted > 0 {
            debug!("Session deleted");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
