//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Cached images are returned as
//! [`CachedImage`](crate::domain::entities::CachedImage) directly.

pub mod health;
pub mod link;
