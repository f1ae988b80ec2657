//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse, StoreCheck};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always answers **200 OK**; a failing component turns `status` into
/// `degraded` instead of changing the HTTP status.
///
/// # Components Checked
///
/// 1. **Database**: `SELECT 1` bounded to one second, plus pool counters
/// 2. **Session cache**: Redis PING, or always ok for the in-memory cache
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": {
///       "status": "ok",
///       "message": "Connection successful",
///       "open_connections": "3",
///       "idle": "2"
///     },
///     "session_cache": {
///       "status": "ok",
///       "message": "Session store reachable"
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_check = check_database(&state).await;

    let cache_check = check_session_cache(&state).await;

    let all_healthy = db_check.status == "ok" && cache_check.status == "ok";

    Json(HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            session_cache: cache_check,
        },
    })
}

async fn check_database(state: &AppState) -> StoreCheck {
    let diagnostics = state.store_health.diagnostics().await;

    StoreCheck {
        status: if diagnostics.healthy { "ok" } else { "error" }.to_string(),
        details: diagnostics.details,
    }
}

async fn check_session_cache(state: &AppState) -> CheckStatus {
    if state.session_cache.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Session store reachable".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Session store unreachable".to_string()),
        }
    }
}
