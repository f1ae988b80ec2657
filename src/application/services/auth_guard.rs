//! Gate for protected operations.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::SessionService;
use crate::domain::entities::SessionUser;
use crate::error::AppError;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Shortest `Authorization` value worth looking up.
const MIN_HEADER_LEN: usize = 8;

/// Caller identity attached to a request that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub token: String,
    pub user: SessionUser,
}

/// Splits the token out of an `Authorization` header value.
///
/// A missing header is treated like an empty one.
///
/// # Errors
///
/// Returns [`AppError::MalformedHeader`] if the value is shorter than 8
/// characters or does not start with `Bearer `.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let value = header.unwrap_or_default();

    if value.chars().count() < MIN_HEADER_LEN {
        return Err(AppError::malformed_header(
            "Malformed Authorization header",
            json!({ "reason": "Header too short" }),
        ));
    }

    value.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        AppError::malformed_header(
            "Malformed Authorization header",
            json!({ "reason": "Expected Bearer scheme" }),
        )
    })
}

pub struct AuthGuard {
    sessions: Arc<SessionService>,
}

impl AuthGuard {
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self { sessions }
    }

    /// Validates an `Authorization` header value and resolves its session.
    ///
    /// # Errors
    ///
    /// - [`AppError::MalformedHeader`] for a missing or malformed header
    /// - [`AppError::Unauthorized`] when no live session matches the token
    pub async fn authorize(&self, header: Option<&str>) -> Result<AuthenticatedSession, AppError> {
        let token = extract_bearer_token(header)?;
        let user = self.sessions.resolve(token).await?;

        Ok(AuthenticatedSession {
            token: token.to_string(),
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockSessionCache;
    use std::time::Duration;

    fn guard(cache: MockSessionCache) -> AuthGuard {
        let sessions = SessionService::new(
            Arc::new(cache),
            "secret".to_string(),
            Duration::from_secs(60),
        );
        AuthGuard::new(Arc::new(sessions))
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert_eq!(extract_bearer_token(Some("Bearer x")).unwrap(), "x");
    }

    #[test]
    fn test_extract_rejects_short_or_missing() {
        assert!(matches!(
            extract_bearer_token(None),
            Err(AppError::MalformedHeader { .. })
        ));
        assert!(matches!(
            extract_bearer_token(Some("")),
            Err(AppError::MalformedHeader { .. })
        ));
        assert!(matches!(
            extract_bearer_token(Some("Bearer ")),
            Err(AppError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_other_schemes() {
        assert!(matches!(
            extract_bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AppError::MalformedHeader { .. })
        ));
        assert!(matches!(
            extract_bearer_token(Some("bearer abcdef")),
            Err(AppError::MalformedHeader { .. })
        ));
    }

    #[tokio::test]
    async fn test_authorize_resolves_session() {
        let mut cache = MockSessionCache::new();
        cache.expect_get().times(1).returning(|_| {
            Ok(Some(SessionUser {
                id: 9,
                display_name: "alice".to_string(),
                email: "alice@example.com".to_string(),
            }))
        });

        let session = guard(cache).authorize(Some("Bearer tok123")).await.unwrap();

        assert_eq!(session.token, "tok123");
        assert_eq!(session.user.id, 9);
    }

    #[tokio::test]
    async fn test_authorize_unknown_session() {
        let mut cache = MockSessionCache::new();
        cache.expect_get().times(1).returning(|_| Ok(None));

        let result = guard(cache).authorize(Some("Bearer tok123")).await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authorize_malformed_header_skips_lookup() {
        let mut cache = MockSessionCache::new();
        cache.expect_get().never();

        let result = guard(cache).authorize(Some("Token abcdef")).await;

        assert!(matches!(result, Err(AppError::MalformedHeader { .. })));
    }
}
