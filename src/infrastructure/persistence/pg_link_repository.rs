//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Upserts are a single `INSERT ... ON CONFLICT` statement; a writer that
/// loses a race on a new code waits for the winner and reports `existed`.
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
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM links WHERE short = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create(&self, link: Link) -> Result<bool, AppError> {
        // xmax is zero only for a freshly inserted row version
        let inserted: bool = sqlx::query_scalar(
            r#"
            INSERT INTO links (short, long, user_id, user_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (short) DO UPDATE
            SET long = EXCLUDED.long,
                user_id = EXCLUDED.user_id,
                user_name = EXCLUDED.user_name,
                updated_at = NOW()
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(&link.short)
        .bind(&link.long)
        .bind(&link.user_id)
        .bind(&link.user_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(!inserted)
    }

    async fn get(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            "SELECT short, long, user_id, user_name FROM links WHERE short = $1",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE short = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT short, long, user_id, user_name
            FROM links
            WHERE user_id = $1
            ORDER BY short
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
