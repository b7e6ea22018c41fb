//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod image;
pub mod links;
pub mod redirect;

pub use health::health_handler;
pub use image::{clear_image_handler, image_handler};
pub use links::{
    create_link_handler, delete_link_handler, link_exists_handler, user_links_handler,
};
pub use redirect::{redirect_handler, root_redirect_handler};
