//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies are plain Serde structs; field rules are enforced by the
//! services so every caller gets the same validation.

pub mod account;
pub mod health;
pub mod links;
