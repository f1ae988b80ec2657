//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`Link`] - A shortened URL owned by a user
//! - [`Click`] - A recorded redirect of a link
//! - [`SessionUser`] - Identity snapshot cached behind a session token
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewUser`, `NewLink`, `NewClick`.

pub mod click;
pub mod link;
pub mod user;

pub use click::{Click, NewClick};
pub use link::{Link, LinkSummary, NewLink};
pub use user::{NewUser, SessionUser, User};
