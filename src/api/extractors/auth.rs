//! Bearer session extractor for protected handlers.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::application::services::AuthenticatedSession;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the `Authorization: Bearer <token>` header to a live session.
///
/// Every protected handler takes this extractor, so the header checks live in
/// one place ([`crate::application::services::AuthGuard`]).
///
/// ```rust,ignore
/// async fn my_handler(AuthSession(session): AuthSession) -> impl IntoResponse {
///     // session.user.id is the caller
/// }
/// ```
///
/// # Rejections
///
/// - `401 malformed_header` if the header is missing, shorter than 8 characters
///   or not a `Bearer` credential
/// - `401 unauthorized` if the token has no live session
#[derive(Debug, Clone)]
pub struct AuthSession(pub AuthenticatedSession);

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let session = state.auth_guard.authorize(header_value).await?;

        Ok(AuthSession(session))
    }
}
