//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    original_url: String,
    short_code: String,
    owner_user_id: i64,
    created_at: DateTime<Utc>,
    enabled: bool,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.original_url,
            r.short_code,
            r.owner_user_id,
            r.created_at,
            r.enabled,
        )
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// The `links_short_code_key` unique constraint is the final arbiter of code
/// uniqueness; a violating insert surfaces as [`AppError::Conflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (original_url, short_code, owner_user_id, enabled)
            VALUES ($1, $2, $3, TRUE)
            RETURNING id, original_url, short_code, owner_user_id, created_at, enabled
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_code)
        .bind(new_link.owner_user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_code, owner_user_id, created_at, enabled
            FROM links
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, owner_user_id: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_url, short_code, owner_user_id, created_at, enabled
            FROM links
            WHERE owner_user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(owner_user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn update_original_url(
        &self,
        short_code: &str,
        owner_user_id: i64,
        original_url: &str,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET original_url = $3
            WHERE short_code = $1 AND owner_user_id = $2
            RETURNING id, original_url, short_code, owner_user_id, created_at, enabled
            "#,
        )
        .bind(short_code)
        .bind(owner_user_id)
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn set_enabled(
        &self,
        short_code: &str,
        owner_user_id: i64,
        enabled: bool,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET enabled = $3
            WHERE short_code = $1 AND owner_user_id = $2
            RETURNING id, original_url, short_code, owner_user_id, created_at, enabled
            "#,
        )
        .bind(short_code)
        .bind(owner_user_id)
        .bind(enabled)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }
}
