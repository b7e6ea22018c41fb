//! PostgreSQL implementation of the cached image slot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::CachedImage;
use crate::domain::repositories::ImageRepository;
use crate::error::AppError;

/// Primary key of the only row in `unsplash_image`.
const SLOT_ID: i32 = 1;

#[derive(sqlx::FromRow)]
struct ImageRow {
    url: String,
    photographer_name: String,
    photographer_profile: String,
    updated: DateTime<Utc>,
}

/// PostgreSQL repository holding the single cached image row.
///
/// The expiration is not stored; the service applies its configured value.
pub struct PgImageRepository {
    pool: Arc<PgPool>,
}

impl PgImageRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    async fn get(&self) -> Result<CachedImage, AppError> {
        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT url, photographer_name, photographer_profile, updated
            FROM unsplash_image
            WHERE id = $1
            "#,
        )
        .bind(SLOT_ID)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(match row {
            Some(row) => CachedImage {
                image_url: row.url,
                photographer_name: row.photographer_name,
                photographer_username: row.photographer_profile,
                updated_at: row.updated,
                expiration_duration: Duration::ZERO,
            },
            None => CachedImage::empty(Duration::ZERO),
        })
    }

    async fn update(&self, image: &CachedImage) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO unsplash_image (id, url, photographer_name, photographer_profile, updated)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET url = EXCLUDED.url,
                photographer_name = EXCLUDED.photographer_name,
                photographer_profile = EXCLUDED.photographer_profile,
                updated = EXCLUDED.updated
            "#,
        )
        .bind(SLOT_ID)
        .bind(&image.image_url)
        .bind(&image.photographer_name)
        .bind(&image.photographer_username)
        .bind(image.updated_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
