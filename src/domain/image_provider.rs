//! Contract for external random-image providers.

use async_trait::async_trait;

use crate::domain::entities::ProviderPhoto;

/// Errors raised while talking to an image provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned no photos")]
    Empty,

    #[error("access key is not a valid header value")]
    InvalidAccessKey,
}

impl ProviderError {
    /// Returns true if retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Empty | ProviderError::InvalidAccessKey => false,
        }
    }
}

/// Source of random photos for the background image cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Fetches one random photo.
    async fn random_photo(&self) -> Result<ProviderPhoto, ProviderError>;
}
