//! Cached background image entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use std::time::Duration;

/// The single cached image slot served by `GET /image`.
///
/// An empty `image_url` marks the slot as invalidated.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedImage {
    pub image_url: String,
    pub photographer_name: String,
    pub photographer_username: String,
    pub updated_at: DateTime<Utc>,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub expiration_duration: Duration,
}

impl CachedImage {
    /// An invalidated slot. The next read refetches unconditionally.
    pub fn empty(expiration_duration: Duration) -> Self {
        Self {
            image_url: String::new(),
            photographer_name: String::new(),
            photographer_username: String::new(),
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
            expiration_duration,
        }
    }

    /// Returns true if the slot holds an image that has not yet expired at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        if self.image_url.is_empty() {
            return false;
        }

        match chrono::Duration::from_std(self.expiration_duration) {
            Ok(ttl) => self.updated_at + ttl > now,
            Err(_) => true,
        }
    }
}

/// Photo metadata returned by an image provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPhoto {
    pub url: String,
    pub photographer_name: String,
    pub photographer_username: String,
}
