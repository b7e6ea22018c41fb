//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence or HTTP concerns.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code mapped to a target URL and its owner
//! - [`CachedImage`] - The single cached background image slot
//! - [`User`] - An authenticated caller, derived from token [`Claims`]

pub mod image;
pub mod link;
pub mod user;

pub use image::{CachedImage, ProviderPhoto};
pub use link::{Link, LinkRequest};
pub use user::{Claims, Role, User};
