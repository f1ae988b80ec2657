//! DTOs for health check endpoint.

use std::collections::BTreeMap;

use serde::Serialize;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: StoreCheck,
    pub session_cache: CheckStatus,
}

/// Database status together with the store's own diagnostics
/// (`message`, `open_connections`, `idle`).
#[derive(Debug, Serialize)]
pub struct StoreCheck {
    pub status: String,

    #[serde(flatten)]
    pub details: BTreeMap<String, String>,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
