//! In-memory implementation of the cached image slot.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::CachedImage;
use crate::domain::repositories::ImageRepository;
use crate::error::AppError;

/// Process-local image slot. Starts empty.
#[derive(Default)]
pub struct MemoryImageRepository {
    image: RwLock<Option<CachedImage>>,
}

impl MemoryImageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageRepository for MemoryImageRepository {
    async fn get(&self) -> Result<CachedImage, AppError> {
        Ok(self
            .image
            .read()
            .await
            .clone()
            .unwrap_or_else(|| CachedImage::empty(Duration::ZERO)))
    }

    async fn update(&self, image: &CachedImage) -> Result<(), AppError> {
        *self.image.write().await = Some(image.clone());
        Ok(())
    }
}
