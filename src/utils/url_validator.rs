//! Validation of user-supplied destination URLs.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must be absolute with a scheme and a host")]
    NotAbsolute,
}

/// Checks that `input` is an absolute URL with a non-empty scheme and host.
///
/// The input is not rewritten: callers store the string exactly as given so a
/// redirect returns precisely what the owner submitted.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for unparseable input and
/// [`UrlValidationError::NotAbsolute`] for URLs without a host
/// (`mailto:`, `javascript:`, `data:` ...).
///
/// # Examples
///
/// ```ignore
/// assert!(validate_absolute_url("https://example.com/x").is_ok());
/// assert!(validate_absolute_url("/relative/path").is_err());
/// assert!(validate_absolute_url("mailto:alice@example.com").is_err());
/// ```
pub fn validate_absolute_url(input: &str) -> Result<(), UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() != input.len() {
        return Err(UrlValidationError::InvalidFormat(
            "URL must not be empty or padded with whitespace".to_string(),
        ));
    }

    // The parser drops embedded tabs and newlines, but they cannot go into a
    // Location header.
    if input.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::InvalidFormat(
            "URL must not contain control characters".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if url.scheme().is_empty() || url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::NotAbsolute);
    }

    Ok(())
}
