//! Handlers for account endpoints.

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::account::{MessageResponse, SignInRequest, SignInResponse, SignUpRequest};
use crate::api::extractors::{ApiJson, AuthSession};
use crate::application::services::auth_guard::BEARER_PREFIX;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /signup`
///
/// # Request Body
///
/// ```json
/// { "display_name": "alice", "email": "alice@example.com", "password": "Abcdef1!" }
/// ```
///
/// # Response Codes
///
/// - **202 Accepted**: `{"message": "user created"}`
/// - **400 Bad Request**: validation error, weak password or duplicate account
pub async fn signup_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    state
        .account_service
        .sign_up(&payload.display_name, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "user created",
        }),
    ))
}

/// Checks credentials and returns a bearer token in the `Authorization`
/// response header.
///
/// # Endpoint
///
/// `POST /signin`
///
/// # Response
///
/// ```json
/// { "success": true, "user": { "id": 1, "display_name": "alice", "email": "alice@example.com" } }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: signed in
/// - **400 Bad Request**: empty email or password
/// - **401 Unauthorized**: unknown email or wrong password
pub async fn signin_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignInRequest>,
) -> Result<Response, AppError> {
    let signed_in = state
        .account_service
        .sign_in(&payload.email, &payload.password)
        .await?;

    let bearer = HeaderValue::from_str(&format!("{BEARER_PREFIX}{}", signed_in.token))
        .map_err(|e| {
            tracing::error!(error = %e, "Session token is not a valid header value");
            AppError::internal("Failed to issue session", json!({}))
        })?;

    let mut response = Json(SignInResponse {
        success: true,
        user: signed_in.user,
    })
    .into_response();
    response.headers_mut().insert(header::AUTHORIZATION, bearer);

    Ok(response)
}

/// Ends the caller's session.
///
/// # Endpoint
///
/// `POST /signout` (Bearer token required)
pub async fn signout_handler(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<impl IntoResponse, AppError> {
    state.account_service.sign_out(&session.token).await?;

    Ok(Json(MessageResponse {
        message: "logout successful",
    }))
}
