//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and business rules behind
//! a small API for HTTP handlers. Dependencies are trait objects so tests can
//! swap in mocks or in-memory stores.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, redirects, owner edits
//! - [`services::account_service::AccountService`] - Sign-up, sign-in, sign-out
//! - [`services::session_service::SessionService`] - Bearer token sessions
//! - [`services::auth_guard::AuthGuard`] - Authorization header gate

pub mod services;
