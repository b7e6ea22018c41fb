//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`unsplash`] - Random photo provider

pub mod persistence;
pub mod unsplash;
