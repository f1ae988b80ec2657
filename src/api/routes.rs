//! Router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`              - Health check: database, session cache (public)
//! - `POST /signup`              - Create account (public)
//! - `POST /signin`              - Open session (public)
//! - `POST /signout`             - Close session (bearer)
//! - `GET  /links`               - Caller's links with click counts (bearer)
//! - `POST /links`               - Shorten a URL (bearer)
//! - `GET  /analytics/{code}`    - Raw click events for a code (bearer)
//! - `GET  /{code}`              - Short link redirect (public)
//! - `POST /{code}`              - Change destination (bearer, owner only)
//! - `POST /{code}/{enabled}`    - Enable or disable (bearer, owner only)
//!
//! Bearer routes take the [`crate::api::extractors::AuthSession`] extractor,
//! which lets public `GET /{code}` and protected `POST /{code}` share a path.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    analytics_handler, create_link_handler, edit_link_handler, health_handler,
    list_links_handler, redirect_handler, signin_handler, signout_handler, signup_handler,
    toggle_link_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}

/// Route table with state and tracing, before path normalization.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/signup", post(signup_handler))
        .route("/signin", post(signin_handler))
        .route("/signout", post(signout_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/analytics/{code}", get(analytics_handler))
        .route("/{code}", get(redirect_handler).post(edit_link_handler))
        .route("/{code}/{enabled}", post(toggle_link_handler))
        .with_state(state)
        .layer(tracing::layer())
}
