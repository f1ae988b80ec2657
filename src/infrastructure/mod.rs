//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence, sessions and password hashing.
//!
//! # Modules
//!
//! - [`credentials`] - Argon2id [`crate::domain::credentials::CredentialHasher`]
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`session`] - Redis and in-memory session caches

pub mod credentials;
pub mod persistence;
pub mod session;
