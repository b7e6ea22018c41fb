//! Domain layer containing business entities and contracts.
//!
//! The domain layer has no dependencies on the HTTP layer or on concrete
//! storage; infrastructure implements the traits defined here.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`image_provider`] - External random-photo source

pub mod entities;
pub mod image_provider;
pub mod repositories;
