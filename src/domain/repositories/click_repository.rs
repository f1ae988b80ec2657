//! Repository trait for click recording and counting.

use std::collections::HashMap;

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only store of click events keyed by short code.
///
/// Click rows are never updated or deleted through this interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click event and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, click: NewClick) -> Result<Click, AppError>;

    /// Lists every click recorded for `short_code`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_code(&self, short_code: &str) -> Result<Vec<Click>, AppError>;

    /// Counts clicks per short code.
    ///
    /// Codes without clicks may be absent from the returned map.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_codes(&self, short_codes: &[String]) -> Result<HashMap<String, i64>, AppError>;
}
