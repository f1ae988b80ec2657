//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};

use crate::application::services::ClickMetadata;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_meta::{device_type_from_headers, location_from_headers};

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link by code
/// 2. Refuse disabled links
/// 3. Record a click with device type (`User-Agent`) and country
///    (`CF-IPCountry` / `X-Country-Code`) when derivable
/// 4. Return 308 Permanent Redirect
///
/// A failed click write is logged and the redirect is still served.
///
/// # Errors
///
/// - **403 Forbidden**: link is disabled
/// - **404 Not Found**: unknown code
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let meta = ClickMetadata {
        device_type: device_type_from_headers(&headers),
        location: location_from_headers(&headers),
    };

    let original_url = state.link_service.resolve_and_record(&code, meta).await?;

    Ok(Redirect::permanent(&original_url))
}
