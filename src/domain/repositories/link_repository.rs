//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for shortened links.
///
/// Implementations must enforce uniqueness of `short_code` at insert time
/// (unique index or equivalent) and apply owner-scoped updates atomically:
/// the ownership predicate is part of the write itself, never a separate read.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new enabled link and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link owned by `owner_user_id` in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, owner_user_id: i64) -> Result<Vec<Link>, AppError>;

    /// Replaces `original_url` of the link with `short_code` if it is owned by
    /// `owner_user_id`.
    ///
    /// Returns `Ok(None)` when no link matches both the code and the owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_original_url(
        &self,
        short_code: &str,
        owner_user_id: i64,
        original_url: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Sets the `enabled` flag of the link with `short_code` if it is owned by
    /// `owner_user_id`.
    ///
    /// Returns `Ok(None)` when no link matches both the code and the owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_enabled(
        &self,
        short_code: &str,
        owner_user_id: i64,
        enabled: bool,
    ) -> Result<Option<Link>, AppError>;
}
