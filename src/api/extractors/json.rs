//! JSON body extractor with API-shaped rejections.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::AppError;

/// Like [`axum::Json`], but a missing `Content-Type`, unparseable JSON or a
/// wrong-typed field is rejected as `400 validation_error` in the usual
/// `{"error": {...}}` body instead of axum's plain-text 415/422.
///
/// ```rust,ignore
/// async fn create(ApiJson(payload): ApiJson<LongUrlRequest>) -> impl IntoResponse {
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let reason = match &rejection {
        JsonRejection::MissingJsonContentType(_) => "missing_content_type",
        JsonRejection::JsonSyntaxError(_) => "syntax",
        JsonRejection::JsonDataError(_) => "data",
        _ => "body",
    };

    tracing::debug!(reason, error = %rejection.body_text(), "Rejected JSON body");

    AppError::bad_request(
        "Invalid request body",
        json!({ "reason": reason, "message": rejection.body_text() }),
    )
}
