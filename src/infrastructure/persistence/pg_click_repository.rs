//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    short_code: String,
    clicked_at: DateTime<Utc>,
    device_type: String,
    location: String,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click {
            id: r.id,
            short_code: r.short_code,
            timestamp: r.clicked_at,
            device_type: r.device_type,
            location: r.location,
        }
    }
}

/// Append-only click log. Rows are never updated or deleted.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (short_code, device_type, location)
            VALUES ($1, $2, $3)
            RETURNING id, short_code, clicked_at, device_type, location
            "#,
        )
        .bind(&click.short_code)
        .bind(&click.device_type)
        .bind(&click.location)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_by_code(&self, short_code: &str) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, short_code, clicked_at, device_type, location
            FROM clicks
            WHERE short_code = $1
            ORDER BY clicked_at, id
            "#,
        )
        .bind(short_code)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }

    async fn count_by_codes(&self, short_codes: &[String]) -> Result<HashMap<String, i64>, AppError> {
        if short_codes.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT short_code, COUNT(*) AS clicks
            FROM clicks
            WHERE short_code = ANY($1)
            GROUP BY short_code
            "#,
        )
        .bind(short_codes)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().collect())
    }
}
