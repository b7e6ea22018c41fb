//! Unsplash integration for the background image cache.

mod client;

pub use client::{DEFAULT_API_URL, UnsplashClient};
