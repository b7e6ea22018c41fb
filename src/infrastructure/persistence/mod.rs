//! Repository implementations.
//!
//! PostgreSQL repositories use SQLx with bound parameters; in-memory
//! repositories back development runs without a database and the HTTP tests.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] / [`MemoryLinkRepository`] - Link storage
//! - [`PgImageRepository`] / [`MemoryImageRepository`] - Cached image slot

pub mod memory_image_repository;
pub mod memory_link_repository;
pub mod pg_image_repository;
pub mod pg_link_repository;

pub use memory_image_repository::MemoryImageRepository;
pub use memory_link_repository::MemoryLinkRepository;
pub use pg_image_repository::PgImageRepository;
pub use pg_link_repository::PgLinkRepository;
