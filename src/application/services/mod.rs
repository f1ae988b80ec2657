//! Business logic services for the application layer.

pub mod account_service;
pub mod auth_guard;
pub mod link_service;
pub mod session_service;

pub use account_service::{AccountService, SignedIn};
pub use auth_guard::{AuthGuard, AuthenticatedSession};
pub use link_service::{ClickMetadata, LinkService};
pub use session_service::SessionService;
