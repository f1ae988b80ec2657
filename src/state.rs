//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AccountService, AuthGuard, LinkService};
use crate::domain::repositories::{SessionCache, StoreHealth};

/// Cloned per request by axum; every field is a cheap `Arc` handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub account_service: Arc<AccountService>,
    pub auth_guard: Arc<AuthGuard>,
    pub session_cache: Arc<dyn SessionCache>,
    pub store_health: Arc<dyn StoreHealth>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        account_service: Arc<AccountService>,
        auth_guard: Arc<AuthGuard>,
        session_cache: Arc<dyn SessionCache>,
        store_health: Arc<dyn StoreHealth>,
    ) -> Self {
        Self {
            link_service,
            account_service,
            auth_guard,
            session_cache,
            store_health,
        }
    }
}
