//! HTTP server initialization and runtime setup.
//!
//! Opens the database pool and session store, wires every repository and
//! service explicitly into [`AppState`], and runs Axum until a shutdown signal.

use crate::api::routes::app_router;
use crate::application::services::{AccountService, AuthGuard, LinkService, SessionService};
use crate::config::Config;
use crate::domain::repositories::{SessionCache, StoreHealth};
use crate::infrastructure::credentials::Argon2Hasher;
use crate::infrastructure::persistence::{
    PgClickRepository, PgLinkRepository, PgStoreHealth, PgUserRepository,
};
use crate::infrastructure::session::{MemorySessionCache, RedisSessionCache};
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Session cache (Redis, or in-memory fallback)
/// - Services and Axum HTTP server
///
/// The pool is closed after the server has drained.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let session_cache = connect_session_cache(&config).await;
    let state = build_state(&config, pool.clone(), session_cache);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Database pool closed");

    Ok(())
}

/// Redis when configured and reachable, otherwise the in-process cache.
async fn connect_session_cache(config: &Config) -> Arc<dyn SessionCache> {
    if let Some(redis_url) = &config.redis_url {
        match RedisSessionCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Sessions stored in Redis");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Using in-memory sessions.",
                    e
                );
            }
        }
    } else {
        tracing::info!("Redis not configured, using in-memory sessions");
    }

    Arc::new(MemorySessionCache::new(config.session_cache_capacity))
}

fn build_state(config: &Config, pool: PgPool, session_cache: Arc<dyn SessionCache>) -> AppState {
    let pool = Arc::new(pool);

    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let click_repository = Arc::new(PgClickRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let store_health: Arc<dyn StoreHealth> = Arc::new(PgStoreHealth::new(pool));

    let sessions = Arc::new(SessionService::new(
        session_cache.clone(),
        config.session_signing_secret.clone(),
        config.session_ttl(),
    ));

    let link_service = Arc::new(LinkService::new(
        link_repository,
        click_repository,
        config.base_url.clone(),
    ));
    let account_service = Arc::new(AccountService::new(
        user_repository,
        Arc::new(Argon2Hasher::new()),
        sessions.clone(),
    ));
    let auth_guard = Arc::new(AuthGuard::new(sessions));

    AppState::new(
        link_service,
        account_service,
        auth_guard,
        session_cache,
        store_health,
    )
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
