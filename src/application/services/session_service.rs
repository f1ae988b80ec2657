//! Bearer session issuing, lookup and revocation.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::domain::entities::SessionUser;
use crate::domain::repositories::SessionCache;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes per session token, before base64 encoding.
const TOKEN_BYTES: usize = 32;

const KEY_PREFIX: &str = "session:";

/// Issues opaque bearer tokens and maps them to cached [`SessionUser`] snapshots.
///
/// Raw tokens never reach the cache. Entries are keyed by the HMAC-SHA256 of the
/// token under `signing_secret`, so a dump of the cache cannot be replayed
/// against the API.
pub struct SessionService {
    cache: Arc<dyn SessionCache>,
    signing_secret: String,
    ttl: Duration,
}

impl SessionService {
    pub fn new(cache: Arc<dyn SessionCache>, signing_secret: String, ttl: Duration) -> Self {
        Self {
            cache,
            signing_secret,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cache key for a raw token: `session:` followed by the hex MAC.
    fn cache_key(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        format!("{KEY_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
    }

    fn generate_token() -> Result<String, AppError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        getrandom::fill(&mut bytes).map_err(|e| {
            tracing::error!(error = %e, "OS random source unavailable");
            AppError::internal("Failed to issue session", json!({}))
        })?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Stores `user` under a fresh token and returns the token.
    ///
    /// The snapshot is immutable for the session's lifetime and expires after
    /// the configured TTL.
    pub async fn issue(&self, user: &SessionUser) -> Result<String, AppError> {
        let token = Self::generate_token()?;
        self.cache
            .put(&self.cache_key(&token), user, self.ttl)
            .await?;

        tracing::debug!(user_id = user.id, "Session issued");
        Ok(token)
    }

    /// Looks up the snapshot stored for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, expired or
    /// revoked, [`AppError::Internal`] if the cache is unreachable.
    pub async fn resolve(&self, token: &str) -> Result<SessionUser, AppError> {
        self.cache
            .get(&self.cache_key(token))
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Session not found or expired" }),
                )
            })
    }

    /// Deletes the session for `token`. Deleting an absent session is not an error.
    pub async fn revoke(&self, token: &str) -> Result<(), AppError> {
        self.cache.delete(&self.cache_key(token)).await
    }
}
