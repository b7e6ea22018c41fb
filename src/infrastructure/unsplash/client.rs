//! Unsplash random-photo client.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::domain::entities::ProviderPhoto;
use crate::domain::image_provider::{ImageProvider, ProviderError};

/// Default Unsplash API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_ATTEMPTS: usize = 3;

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    full: String,
}

#[derive(Debug, Deserialize)]
struct Photographer {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    username: String,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
    user: Photographer,
}

impl From<Photo> for ProviderPhoto {
    fn from(photo: Photo) -> Self {
        Self {
            url: photo.urls.full,
            photographer_name: photo.user.name.unwrap_or_default(),
            photographer_username: photo.user.username,
        }
    }
}

/// Fetches landscape photos from configured Unsplash collections.
///
/// Transient failures (timeouts, connection errors, 429 and 5xx responses) are
/// retried with jittered exponential backoff, up to three retries.
pub struct UnsplashClient {
    http: Client,
    api_url: String,
    collections: Vec<String>,
}

impl UnsplashClient {
    /// Creates a client authenticating with `access_key`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidAccessKey`] if the key contains characters
    /// invalid in a header, and [`ProviderError::Http`] if the HTTP client
    /// cannot be built.
    pub fn new(
        access_key: &str,
        api_url: impl Into<String>,
        collections: Vec<String>,
    ) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept-Version", HeaderValue::from_static("v1"));

        let mut auth = HeaderValue::from_str(&format!("Client-ID {access_key}"))
            .map_err(|_| ProviderError::InvalidAccessKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            collections,
        })
    }

    async fn fetch_once(&self) -> Result<ProviderPhoto, ProviderError> {
        let url = format!("{}/photos/random", self.api_url);
        let mut query = vec![
            ("orientation", "landscape".to_string()),
            ("count", "1".to_string()),
        ];
        if !self.collections.is_empty() {
            query.push(("collections", self.collections.join(",")));
        }

        debug!(url = %url, "Requesting random photo");

        let response = self.http.get(&url).query(&query).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let photos: Vec<Photo> = response.json().await?;
        photos
            .into_iter()
            .next()
            .map(ProviderPhoto::from)
            .ok_or(ProviderError::Empty)
    }
}

#[async_trait]
impl ImageProvider for UnsplashClient {
    async fn random_photo(&self) -> Result<ProviderPhoto, ProviderError> {
        let strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(RETRY_ATTEMPTS);

        RetryIf::spawn(
            strategy,
            || self.fetch_once(),
            |e: &ProviderError| {
                let transient = e.is_transient();
                if transient {
                    warn!(error = %e, "Unsplash request failed, retrying");
                }
                transient
            },
        )
        .await
    }
}
