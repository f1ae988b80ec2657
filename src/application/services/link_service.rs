//! Link creation, redirect resolution and owner management.

use std::sync::Arc;

use crate::domain::entities::{Click, Link, LinkSummary, NewClick, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::ShortCodeGenerator;
use crate::utils::url_validator::validate_absolute_url;
use serde_json::json;

/// Collision retries before creation gives up.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Top-level route segments a generated code must never shadow.
const RESERVED_CODES: &[&str] = &["analytics", "health", "links", "signin", "signout", "signup"];

/// Request metadata attached to a recorded click.
#[derive(Debug, Clone, Default)]
pub struct ClickMetadata {
    pub device_type: Option<String>,
    pub location: Option<String>,
}

/// Service for creating, resolving and managing shortened links.
///
/// Only the owner of a link may edit or toggle it. Redirect resolution is
/// public and records one click per successful lookup.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
    codes: ShortCodeGenerator,
    max_attempts: usize,
    base_url: String,
}

impl LinkService {
    /// Creates a service generating base62 codes of the default length.
    ///
    /// `base_url` is the public origin short URLs are built from, e.g.
    /// `https://teeny.example`.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            links,
            clicks,
            codes: ShortCodeGenerator::default(),
            max_attempts: MAX_CODE_ATTEMPTS,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Replaces the code generator and the collision retry limit.
    pub fn with_code_generator(mut self, codes: ShortCodeGenerator, max_attempts: usize) -> Self {
        self.codes = codes;
        self.max_attempts = max_attempts;
        self
    }

    /// Full short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Creates an enabled short link owned by `owner_id`.
    ///
    /// A candidate code is checked before insert. If another writer takes the
    /// same code between the check and the insert, the unique constraint
    /// rejects it and a new candidate is drawn.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `original_url` is not an absolute URL
    /// - [`AppError::Internal`] when every attempt collided, or on storage errors
    pub async fn create_short_link(
        &self,
        owner_id: i64,
        original_url: &str,
    ) -> Result<Link, AppError> {
        Self::validate_url(original_url)?;

        for attempt in 1..=self.max_attempts {
            let short_code = self.codes.generate();
            if RESERVED_CODES.contains(&short_code.as_str()) {
                continue;
            }

            if self.links.find_by_code(&short_code).await?.is_some() {
                tracing::debug!(attempt, code = %short_code, "Short code collision");
                continue;
            }

            let new_link = NewLink {
                original_url: original_url.to_string(),
                short_code,
                owner_user_id: owner_id,
            };

            match self.links.create(new_link).await {
                Ok(link) => {
                    tracing::info!(
                        code = %link.short_code,
                        owner_id,
                        "Short link created"
                    );
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(attempt, "Short code taken concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Resolves `code` to its destination and records a click.
    ///
    /// A failed click insert is logged and does not block the redirect.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for an unknown code
    /// - [`AppError::LinkDisabled`] if the owner disabled the link
    pub async fn resolve_and_record(
        &self,
        code: &str,
        meta: ClickMetadata,
    ) -> Result<String, AppError> {
        let link = self.get_link_by_code(code).await?;

        if !link.enabled {
            return Err(AppError::link_disabled(
                "Short link is disabled",
                json!({ "code": code }),
            ));
        }

        let click = NewClick::new(code, meta.device_type, meta.location);
        if let Err(e) = self.clicks.record(click).await {
            tracing::warn!(code, error = %e, "Failed to record click");
        }

        Ok(link.original_url)
    }

    /// Links owned by `owner_id` in creation order, each with its click count.
    pub async fn list_owned(&self, owner_id: i64) -> Result<Vec<LinkSummary>, AppError> {
        let links = self.links.list_by_owner(owner_id).await?;
        if links.is_empty() {
            return Ok(Vec::new());
        }

        let codes: Vec<String> = links.iter().map(|l| l.short_code.clone()).collect();
        let counts = self.clicks.count_by_codes(&codes).await?;

        Ok(links
            .into_iter()
            .map(|link| {
                let clicks = counts.get(&link.short_code).copied().unwrap_or(0);
                LinkSummary { link, clicks }
            })
            .collect())
    }

    /// Points an owned link at a new destination. The code is unchanged.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `new_url` is not an absolute URL
    /// - [`AppError::NotFound`] for an unknown code
    /// - [`AppError::Forbidden`] if `owner_id` does not own the link
    pub async fn edit_original_url(
        &self,
        owner_id: i64,
        code: &str,
        new_url: &str,
    ) -> Result<Link, AppError> {
        Self::validate_url(new_url)?;
        self.ensure_owned(owner_id, code).await?;

        let link = self
            .links
            .update_original_url(code, owner_id, new_url)
            .await?
            .ok_or_else(|| Self::link_not_found(code))?;

        tracing::info!(code, owner_id, "Short link destination updated");
        Ok(link)
    }

    /// Enables or disables an owned link.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for an unknown code
    /// - [`AppError::Forbidden`] if `owner_id` does not own the link
    pub async fn set_enabled(
        &self,
        owner_id: i64,
        code: &str,
        enabled: bool,
    ) -> Result<Link, AppError> {
        self.ensure_owned(owner_id, code).await?;

        let link = self
            .links
            .set_enabled(code, owner_id, enabled)
            .await?
            .ok_or_else(|| Self::link_not_found(code))?;

        tracing::info!(code, owner_id, enabled, "Short link toggled");
        Ok(link)
    }

    /// Every recorded click for `code`, oldest first. Unknown codes yield an
    /// empty list.
    pub async fn click_events(&self, code: &str) -> Result<Vec<Click>, AppError> {
        self.clicks.list_by_code(code).await
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.links
            .find_by_code(code)
            .await?
            .ok_or_else(|| Self::link_not_found(code))
    }

    async fn ensure_owned(&self, owner_id: i64, code: &str) -> Result<(), AppError> {
        let link = self.get_link_by_code(code).await?;

        if !link.is_owned_by(owner_id) {
            return Err(AppError::forbidden(
                "You do not own this link",
                json!({ "code": code }),
            ));
        }

        Ok(())
    }

    fn validate_url(url: &str) -> Result<(), AppError> {
        validate_absolute_url(url)
            .map_err(|e| AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() })))
    }

    fn link_not_found(code: &str) -> AppError {
        AppError::not_found("Short link not found", json!({ "code": code }))
    }
}
