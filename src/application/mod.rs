//! Application layer services implementing business logic.
//!
//! Services consume the domain's repository and provider traits and expose a
//! small API to the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, resolution and ownership rules
//! - [`services::image_service::ImageService`] - Cached background image
//! - [`services::auth_service::AuthService`] - Bearer token verification

pub mod services;
