//! Health probe for the backing store.

use std::collections::BTreeMap;

use async_trait::async_trait;

/// Result of a store connectivity probe.
#[derive(Debug, Clone)]
pub struct StoreDiagnostics {
    pub healthy: bool,
    /// Free-form statistics (`status`, `message`, pool counters, ...).
    pub details: BTreeMap<String, String>,
}

/// Reports connectivity and pool statistics of the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Probes the store. Implementations bound the probe duration themselves.
    async fn diagnostics(&self) -> StoreDiagnostics;
}
