//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access so the services can run against
//! PostgreSQL in production and against in-memory stores in development and
//! tests.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage
//! - [`ImageRepository`] - Cached image slot

pub mod image_repository;
pub mod link_repository;

pub use image_repository::ImageRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use image_repository::MockImageRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
