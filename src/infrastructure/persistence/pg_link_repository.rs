//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkWithClicks, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
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
    async fn next_id(&self) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence('links', 'id'))")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(id)
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (id, user_id, code, long_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, code, long_url, created_at
            "#,
        )
        .bind(new_link.id)
        .bind(new_link.user_id)
        .bind(&new_link.code)
        .bind(&new_link.long_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            "SELECT id, user_id, code, long_url, created_at FROM links WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_with_clicks(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<LinkWithClicks>, AppError> {
        let row = sqlx::query_as::<_, LinkWithClicks>(
            r#"
            SELECT l.id, l.user_id, l.code, l.long_url, l.created_at, COUNT(c.id) AS clicks
            FROM links l
            LEFT JOIN clicks c ON c.link_id = l.id
            WHERE l.id = $1 AND l.user_id = $2
            GROUP BY l.id
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<LinkWithClicks>, AppError> {
        let rows = sqlx::query_as::<_, LinkWithClicks>(
            r#"
            SELECT l.id, l.user_id, l.code, l.long_url, l.created_at, COUNT(c.id) AS clicks
            FROM links l
            LEFT JOIN clicks c ON c.link_id = l.id
            WHERE l.user_id = $1
            GROUP BY l.id
            ORDER BY l.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
