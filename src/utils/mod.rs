//! Utility functions used across the application.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Destination URL validation
//! - [`password_policy`] - Sign-up password rules
//! - [`request_meta`] - Device type and location from request headers

pub mod code_generator;
pub mod password_policy;
pub mod request_meta;
pub mod url_validator;
