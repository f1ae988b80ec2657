//! HTTP middleware for request processing.
//!
//! Authentication is not a middleware here: protected handlers take the
//! [`crate::api::extractors::AuthSession`] extractor.

pub mod tracing;
