//! Handler for raw click analytics.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::api::dto::links::ClickEventView;
use crate::api::extractors::AuthSession;
use crate::error::AppError;
use crate::state::AppState;

/// Returns every recorded click for a short code, oldest first.
///
/// # Endpoint
///
/// `GET /analytics/{code}` (Bearer token required)
///
/// Any signed-in user may read the clicks of any code. Unknown codes return an
/// empty array.
///
/// # Response
///
/// **202 Accepted**
///
/// ```json
/// [
///   { "id": 1, "short_code": "aB3xY9", "timestamp": "2024-06-01T12:00:00Z",
///     "device_type": "Desktop", "location": "DE" }
/// ]
/// ```
pub async fn analytics_handler(
    State(state): State<AppState>,
    AuthSession(_session): AuthSession,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let clicks = state.link_service.click_events(&code).await?;

    let events: Vec<ClickEventView> = clicks.into_iter().map(ClickEventView::from).collect();

    Ok((StatusCode::ACCEPTED, Json(events)))
}
