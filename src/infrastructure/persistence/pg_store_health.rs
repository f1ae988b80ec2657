//! PostgreSQL health probe.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::repositories::{StoreDiagnostics, StoreHealth};

const PING_TIMEOUT: Duration = Duration::from_secs(1);

pub struct PgStoreHealth {
    pool: Arc<PgPool>,
}

impl PgStoreHealth {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for PgStoreHealth {
    async fn diagnostics(&self) -> StoreDiagnostics {
        let mut details = BTreeMap::new();
        details.insert("open_connections".to_string(), self.pool.size().to_string());
        details.insert("idle".to_string(), self.pool.num_idle().to_string());

        let ping = sqlx::query("SELECT 1").execute(self.pool.as_ref());
        let healthy = match tokio::time::timeout(PING_TIMEOUT, ping).await {
            Ok(Ok(_)) => {
                details.insert("message".to_string(), "Connection successful".to_string());
                true
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Database health check failed");
                details.insert("message".to_string(), format!("Connection failed: {e}"));
                false
            }
            Err(_) => {
                tracing::warn!("Database health check timed out");
                details.insert("message".to_string(), "Connection timed out".to_string());
                false
            }
        };

        StoreDiagnostics { healthy, details }
    }
}
