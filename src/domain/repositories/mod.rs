//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by the infrastructure layer.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link CRUD
//! - [`ClickRepository`] - Click recording and counting
//! - [`UserRepository`] - Account storage
//! - [`SessionCache`] - TTL-bound session snapshots
//! - [`StoreHealth`] - Backing store diagnostics
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod click_repository;
pub mod link_repository;
pub mod session_cache;
pub mod store_health;
pub mod user_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;
pub use session_cache::SessionCache;
pub use store_health::{StoreDiagnostics, StoreHealth};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use session_cache::MockSessionCache;
#[cfg(test)]
pub use store_health::MockStoreHealth;
#[cfg(test)]
pub use user_repository::MockUserRepository;
