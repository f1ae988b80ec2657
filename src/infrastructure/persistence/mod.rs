//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and owner-scoped updates
//! - [`PgClickRepository`] - Click log and per-code counts
//! - [`PgUserRepository`] - Account storage
//! - [`PgStoreHealth`] - Connectivity probe for the health endpoint

pub mod pg_click_repository;
pub mod pg_link_repository;
pub mod pg_store_health;
pub mod pg_user_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_store_health::PgStoreHealth;
pub use pg_user_repository::PgUserRepository;
