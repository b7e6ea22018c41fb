//! Background image cache backed by an external photo provider.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::entities::CachedImage;
use crate::domain::image_provider::ImageProvider;
use crate::domain::repositories::ImageRepository;
use crate::error::AppError;

/// Single-slot cache with time-based invalidation.
///
/// The slot is served until `updated_at + expiration` has passed, then
/// refreshed lazily by the next reader. Refreshes are serialized so that a
/// burst of readers hitting a stale slot causes one provider call.
pub struct ImageService {
    repository: Arc<dyn ImageRepository>,
    provider: Arc<dyn ImageProvider>,
    expiration: Duration,
    refresh_lock: Mutex<()>,
}

impl ImageService {
    /// Creates a new image service.
    ///
    /// `expiration` is how long a fetched image is served before refreshing.
    pub fn new(
        repository: Arc<dyn ImageRepository>,
        provider: Arc<dyn ImageProvider>,
        expiration: Duration,
    ) -> Self {
        Self {
            repository,
            provider,
            expiration,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns the cached image, refreshing it first if it is empty or expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the slot cannot be read or written, or
    /// if the provider fails after retries.
    pub async fn get_image(&self) -> Result<CachedImage, AppError> {
        let cached = self.read_slot().await?;
        if cached.is_fresh(Utc::now()) {
            return Ok(cached);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another request may have refreshed the slot while we waited.
        let cached = self.read_slot().await?;
        if cached.is_fresh(Utc::now()) {
            return Ok(cached);
        }

        self.refresh().await
    }

    /// Invalidates the slot so the next [`Self::get_image`] refetches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn clear(&self) -> Result<(), AppError> {
        let _guard = self.refresh_lock.lock().await;

        self.repository
            .update(&CachedImage::empty(self.expiration))
            .await?;

        tracing::info!("Image cache cleared");
        Ok(())
    }

    async fn read_slot(&self) -> Result<CachedImage, AppError> {
        let mut image = self.repository.get().await?;
        image.expiration_duration = self.expiration;
        Ok(image)
    }

    async fn refresh(&self) -> Result<CachedImage, AppError> {
        let photo = self.provider.random_photo().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch random image");
            AppError::internal(
                "Failed to fetch image",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let image = CachedImage {
            image_url: photo.url,
            photographer_name: photo.photographer_name,
            photographer_username: photo.photographer_username,
            updated_at: Utc::now(),
            expiration_duration: self.expiration,
        };

        self.repository.update(&image).await?;

        metrics::counter!("image_refreshes_total").increment(1);
        tracing::info!(url = %image.image_url, "Image cache refreshed");

        Ok(image)
    }
}
