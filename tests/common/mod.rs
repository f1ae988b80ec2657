#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use teenyurl::api::routes::api_router;
use teenyurl::application::services::{AccountService, AuthGuard, LinkService, SessionService};
use teenyurl::domain::credentials::CredentialHasher;
use teenyurl::domain::entities::{Click, Link, NewClick, NewLink, NewUser, User};
use teenyurl::domain::repositories::{
    ClickRepository, LinkRepository, StoreDiagnostics, StoreHealth, UserRepository,
};
use teenyurl::error::AppError;
use teenyurl::infrastructure::session::MemorySessionCache;
use teenyurl::state::AppState;

pub const PASSWORD: &str = "Abcdef1!";
pub const BASE_URL: &str = "http://teeny.test";

fn unique_violation(constraint: &str) -> AppError {
    AppError::conflict(
        "Unique constraint violation",
        json!({ "constraint": constraint }),
    )
}

/// Link store with the same unique-code rule as the `links` table.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    rows: Mutex<Vec<Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn all(&self) -> Vec<Link> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|l| l.short_code == new_link.short_code) {
            return Err(unique_violation("links_short_code_key"));
        }

        let link = Link::new(
            self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            new_link.original_url,
            new_link.short_code,
            new_link.owner_user_id,
            Utc::now(),
            true,
        );
        rows.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|l| l.short_code == short_code).cloned())
    }

    async fn list_by_owner(&self, owner_user_id: i64) -> Result<Vec<Link>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|l| l.owner_user_id == owner_user_id)
            .cloned()
            .collect())
    }

    async fn update_original_url(
        &self,
        short_code: &str,
        owner_user_id: i64,
        original_url: &str,
    ) -> Result<Option<Link>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|l| l.short_code == short_code && l.owner_user_id == owner_user_id)
            .map(|l| {
                l.original_url = original_url.to_string();
                l.clone()
            }))
    }

    async fn set_enabled(
        &self,
        short_code: &str,
        owner_user_id: i64,
        enabled: bool,
    ) -> Result<Option<Link>, AppError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|l| l.short_code == short_code && l.owner_user_id == owner_user_id)
            .map(|l| {
                l.enabled = enabled;
                l.clone()
            }))
    }
}

/// Append-only click log. `fail_writes` simulates a store outage on insert.
#[derive(Default)]
pub struct InMemoryClickRepository {
    rows: Mutex<Vec<Click>>,
    next_id: AtomicI64,
    pub fail_writes: AtomicBool,
}

impl InMemoryClickRepository {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn record(&self, click: NewClick) -> Result<Click, AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }

        let click = Click {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            short_code: click.short_code,
            timestamp: Utc::now(),
            device_type: click.device_type,
            location: click.location,
        };
        self.rows.lock().unwrap().push(click.clone());
        Ok(click)
    }

    async fn list_by_code(&self, short_code: &str) -> Result<Vec<Click>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|c| c.short_code == short_code)
            .cloned()
            .collect())
    }

    async fn count_by_codes(&self, short_codes: &[String]) -> Result<HashMap<String, i64>, AppError> {
        let rows = self.rows.lock().unwrap();
        let mut counts = HashMap::new();
        for click in rows.iter().filter(|c| short_codes.contains(&c.short_code)) {
            *counts.entry(click.short_code.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

/// Account store with unique email and display name.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == new_user.email) {
            return Err(unique_violation("users_email_key"));
        }
        if rows.iter().any(|u| u.display_name == new_user.display_name) {
            return Err(unique_violation("users_display_name_key"));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            display_name: new_user.display_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: new_user.created_at,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }
}

/// Reversible stand-in for Argon2 so HTTP tests stay fast.
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, secret: &str) -> Result<String, AppError> {
        Ok(format!("plain${secret}"))
    }

    fn verify(&self, secret: &str, hash: &str) -> bool {
        hash.strip_prefix("plain$") == Some(secret)
    }
}

#[derive(Default)]
pub struct FakeStoreHealth {
    pub down: AtomicBool,
}

#[async_trait]
impl StoreHealth for FakeStoreHealth {
    async fn diagnostics(&self) -> StoreDiagnostics {
        let healthy = !self.down.load(Ordering::SeqCst);
        let mut details = BTreeMap::new();
        details.insert(
            "message".to_string(),
            if healthy { "Connection successful" } else { "Connection timed out" }.to_string(),
        );
        details.insert("open_connections".to_string(), "1".to_string());
        details.insert("idle".to_string(), "1".to_string());
        StoreDiagnostics { healthy, details }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub links: Arc<InMemoryLinkRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
    pub store_health: Arc<FakeStoreHealth>,
}

pub fn create_test_state(session_ttl: Duration) -> TestApp {
    let links = Arc::new(InMemoryLinkRepository::default());
    let clicks = Arc::new(InMemoryClickRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());
    let store_health = Arc::new(FakeStoreHealth::default());
    let session_cache = Arc::new(MemorySessionCache::new(1_000));

    let sessions = Arc::new(SessionService::new(
        session_cache.clone(),
        "test-signing-secret".to_string(),
        session_ttl,
    ));

    let link_service = Arc::new(LinkService::new(links.clone(), clicks.clone(), BASE_URL));
    let account_service = Arc::new(AccountService::new(
        users,
        Arc::new(PlainHasher),
        sessions.clone(),
    ));
    let auth_guard = Arc::new(AuthGuard::new(sessions));

    let state = AppState::new(
        link_service,
        account_service,
        auth_guard,
        session_cache,
        store_health.clone(),
    );

    let server = TestServer::new(api_router(state.clone())).unwrap();

    TestApp {
        server,
        state,
        links,
        clicks,
        store_health,
    }
}

pub fn create_test_app() -> TestApp {
    create_test_state(Duration::from_secs(7200))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Signs up and signs in, returning the bearer token.
pub async fn sign_up_and_in(server: &TestServer, display_name: &str, email: &str) -> String {
    let response = server
        .post("/signup")
        .json(&json!({
            "display_name": display_name,
            "email": email,
            "password": PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), 202);

    let response = server
        .post("/signin")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), 200);

    let header = response.header("authorization");
    header
        .to_str()
        .unwrap()
        .strip_prefix("Bearer ")
        .unwrap()
        .to_string()
}

/// Creates a link and returns its short code.
pub async fn create_link(server: &TestServer, token: &str, long_url: &str) -> String {
    let response = server
        .post("/links")
        .add_header("Authorization", bearer(token))
        .json(&json!({ "long_url": long_url }))
        .await;
    assert_eq!(response.status_code(), 202);

    let json = response.json::<serde_json::Value>();
    let short_url = json["short_url"].as_str().unwrap();
    short_url
        .strip_prefix(&format!("{BASE_URL}/"))
        .unwrap()
        .to_string()
}
