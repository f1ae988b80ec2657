//! Handlers for owner link management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::api::dto::links::{CreateLinkResponse, LinkListItem, LinkView, LongUrlRequest};
use crate::api::extractors::{ApiJson, AuthSession};
use crate::application::services::LinkService;
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

fn link_view(links: &LinkService, link: Link) -> LinkView {
    LinkView {
        id: link.id,
        short_url: links.short_url(&link.short_code),
        original_url: link.original_url,
        created_at: link.created_at,
        enabled: link.enabled,
    }
}

/// Shortens a URL for the caller.
///
/// # Endpoint
///
/// `POST /links` (Bearer token required)
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/x" }
/// ```
///
/// # Response
///
/// **202 Accepted**
///
/// ```json
/// { "short_url": "http://localhost:3000/aB3xY9", "original_url": "https://example.com/x", "link_id": 1 }
/// ```
pub async fn create_link_handler(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    ApiJson(payload): ApiJson<LongUrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    let link = state
        .link_service
        .create_short_link(session.user.id, &payload.long_url)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(CreateLinkResponse {
            short_url: state.link_service.short_url(&link.short_code),
            original_url: link.original_url,
            link_id: link.id,
        }),
    ))
}

/// Lists the caller's links in creation order with click counts.
///
/// # Endpoint
///
/// `GET /links` (Bearer token required)
pub async fn list_links_handler(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    let summaries = state.link_service.list_owned(session.user.id).await?;

    let items: Vec<LinkListItem> = summaries
        .into_iter()
        .map(|summary| LinkListItem {
            link: link_view(&state.link_service, summary.link),
            clicks: summary.clicks,
        })
        .collect();

    Ok((StatusCode::ACCEPTED, Json(items)))
}

/// Points an owned link at a new URL.
///
/// # Endpoint
///
/// `POST /{code}` (Bearer token required)
///
/// # Response Codes
///
/// - **202 Accepted**: updated link
/// - **400 Bad Request**: invalid URL
/// - **403 Forbidden**: caller does not own the link
/// - **404 Not Found**: unknown code
pub async fn edit_link_handler(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(code): Path<String>,
    ApiJson(payload): ApiJson<LongUrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    let link = state
        .link_service
        .edit_original_url(session.user.id, &code, &payload.long_url)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(link_view(&state.link_service, link)),
    ))
}

/// Enables or disables an owned link.
///
/// # Endpoint
///
/// `POST /{code}/{enabled}` where `enabled` is `true` or `false`
/// (Bearer token required)
///
/// # Response Codes
///
/// - **202 Accepted**: updated link
/// - **400 Bad Request**: `enabled` is not `true`/`false`
/// - **403 Forbidden**: caller does not own the link
/// - **404 Not Found**: unknown code
pub async fn toggle_link_handler(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path((code, enabled)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let enabled: bool = enabled.parse().map_err(|_| {
        AppError::bad_request(
            "Enabled flag must be 'true' or 'false'",
            json!({ "value": enabled }),
        )
    })?;

    let link = state
        .link_service
        .set_enabled(session.user.id, &code, enabled)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(link_view(&state.link_service, link)),
    ))
}
