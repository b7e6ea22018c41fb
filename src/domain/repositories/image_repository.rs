//! Repository trait for the cached image slot.

use crate::domain::entities::CachedImage;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage for the single cached image record.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryImageRepository`]
/// - [`crate::infrastructure::persistence::PgImageRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Reads the slot.
    ///
    /// A never-written slot is returned as an entry with an empty URL, which
    /// callers treat as stale.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get(&self) -> Result<CachedImage, AppError>;

    /// Overwrites the slot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, image: &CachedImage) -> Result<(), AppError>;
}
