//! Password strength policy applied at sign-up.

use crate::error::AppError;
use serde_json::json;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 20;

/// Checks the password policy.
///
/// # Rules
///
/// - Length: 8-20 characters (counted as Unicode scalar values)
/// - At least one uppercase letter
/// - At least one lowercase letter
/// - At least one punctuation or symbol character
///
/// Digits and whitespace count towards the length only.
///
/// # Errors
///
/// Returns [`AppError::WeakPassword`] listing every failed rule.
///
/// # Examples
///
/// ```ignore
/// assert!(check_password_strength("Abcdef1!").is_ok());
/// assert!(check_password_strength("abcdef1!").is_err()); // no uppercase
/// ```
pub fn check_password_strength(password: &str) -> Result<(), AppError> {
    let length = password.chars().count();

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_symbol = false;

    for c in password.chars() {
        if c.is_uppercase() {
            has_upper = true;
        } else if c.is_lowercase() {
            has_lower = true;
        } else if is_symbol(c) {
            has_symbol = true;
        }
    }

    let mut failed = Vec::new();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        failed.push("length");
    }
    if !has_upper {
        failed.push("uppercase");
    }
    if !has_lower {
        failed.push("lowercase");
    }
    if !has_symbol {
        failed.push("symbol");
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(AppError::weak_password(
            format!(
                "Password must be {MIN_PASSWORD_LENGTH}-{MAX_PASSWORD_LENGTH} characters and contain \
                 an uppercase letter, a lowercase letter and a symbol"
            ),
            json!({ "failed_rules": failed }),
        ))
    }
}

fn is_symbol(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control()
}
