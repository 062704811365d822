//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, LinkWithClicks, NewClick};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// PostgreSQL repository for click tracking and aggregate queries.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let result = sqlx::query_as::<_, Click>(
            r#"
            INSERT INTO clicks (link_id, user_agent, referer, ip)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, clicked_at, user_agent, referer, ip
            "#,
        )
        .bind(new_click.link_id)
        .bind(&new_click.user_agent)
        .bind(&new_click.referer)
        .bind(&new_click.ip)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(click) => Ok(click),
            Err(e)
                if e
                    .as_database_error()
                    .is_some_and(|db| db.is_foreign_key_violation()) =>
            {
                Err(AppError::bad_request(
                    "Link does not exist",
                    json!({ "link_id": new_click.link_id }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn top_links(&self, limit: i64) -> Result<Vec<LinkWithClicks>, AppError> {
        let rows = sqlx::query_as::<_, LinkWithClicks>(
            r#"
            SELECT l.id, l.user_id, l.code, l.long_url, l.created_at, COUNT(c.id) AS clicks
            FROM links l
            LEFT JOIN clicks c ON c.link_id = l.id
            GROUP BY l.id
            ORDER BY clicks DESC, l.id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn totals(&self) -> Result<(i64, i64), AppError> {
        let totals = sqlx::query_as::<_, (i64, i64)>(
            "SELECT (SELECT COUNT(*) FROM links), (SELECT COUNT(*) FROM clicks)",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(totals)
    }
}
