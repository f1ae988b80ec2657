//! Application-wide error type and its HTTP mapping.
//!
//! Every layer returns [`AppError`]. Handlers let axum turn it into a JSON body
//! of the form:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short link not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Password does not satisfy the password policy.
    #[error("{message}")]
    WeakPassword { message: String, details: Value },

    /// An account with the same email or display name already exists.
    #[error("{message}")]
    DuplicateAccount { message: String, details: Value },

    /// `Authorization` header is absent or not of the form `Bearer <token>`.
    #[error("{message}")]
    MalformedHeader { message: String, details: Value },

    /// Unknown email or wrong password. Never says which.
    #[error("{message}")]
    InvalidCredentials { message: String, details: Value },

    /// Bearer token is unknown, expired or revoked.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Caller is authenticated but does not own the resource.
    #[error("{message}")]
    Forbidden { message: String, details: Value },

    /// The link exists but its owner disabled it.
    #[error("{message}")]
    LinkDisabled { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Unique constraint violation raised by a repository.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Storage or cache fault. The message sent to clients is always generic.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn weak_password(message: impl Into<String>, details: Value) -> Self {
        Self::WeakPassword {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_account(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateAccount {
            message: message.into(),
            details,
        }
    }

    pub fn malformed_header(message: impl Into<String>, details: Value) -> Self {
        Self::MalformedHeader {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            message: "Email or password is incorrect".to_string(),
            details: json!({}),
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn link_disabled(message: impl Into<String>, details: Value) -> Self {
        Self::LinkDisabled {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::WeakPassword { .. } | Self::DuplicateAccount { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::MalformedHeader { .. }
            | Self::InvalidCredentials { .. }
            | Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } | Self::LinkDisabled { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::WeakPassword { .. } => "weak_password",
            Self::DuplicateAccount { .. } => "duplicate_account",
            Self::MalformedHeader { .. } => "malformed_header",
            Self::InvalidCredentials { .. } => "invalid_credentials",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Forbidden { .. } => "forbidden",
            Self::LinkDisabled { .. } => "link_disabled",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::Validation { message, details }
            | Self::WeakPassword { message, details }
            | Self::DuplicateAccount { message, details }
            | Self::MalformedHeader { message, details }
            | Self::InvalidCredentials { message, details }
            | Self::Unauthorized { message, details }
            | Self::Forbidden { message, details }
            | Self::LinkDisabled { message, details }
            | Self::NotFound { message, details }
            | Self::Conflict { message, details }
            | Self::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let bearer_challenge = matches!(
            self,
            Self::MalformedHeader { .. } | Self::Unauthorized { .. }
        );

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();
        if bearer_challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let codes: Vec<Value> = errs
                    .iter()
                    .map(|e| Value::String(e.code.to_string()))
                    .collect();
                (field.to_string(), Value::Array(codes))
            })
            .collect();

        AppError::bad_request("Validation failed", json!({ "fields": fields }))
    }
}
