//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod account;
pub mod analytics;
pub mod health;
pub mod links;
pub mod redirect;

pub use account::{signin_handler, signout_handler, signup_handler};
pub use analytics::analytics_handler;
pub use health::health_handler;
pub use links::{create_link_handler, edit_link_handler, list_links_handler, toggle_link_handler};
pub use redirect::redirect_handler;
