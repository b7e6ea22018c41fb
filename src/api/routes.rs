//! API route configuration.
//!
//! Authentication is optional at the routing level; handlers that need a
//! caller extract [`AuthUser`](crate::api::middleware::auth::AuthUser).

use crate::api::handlers::{
    clear_image_handler, create_link_handler, delete_link_handler, image_handler,
    link_exists_handler, user_links_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Link management and background image routes.
///
/// # Endpoints
///
/// - `POST   /link`               - Create or overwrite a link
/// - `DELETE /link/{code}`        - Delete a link
/// - `GET    /link/{code}/exists` - Check whether a code is taken
/// - `GET    /user/links`         - List the caller's links
/// - `GET    /image`              - Current background image
/// - `GET    /image/clear`        - Invalidate the background image
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(create_link_handler))
        .route("/link/{code}", delete(delete_link_handler))
        .route("/link/{code}/exists", get(link_exists_handler))
        .route("/user/links", get(user_links_handler))
        .route("/image", get(image_handler))
        .route("/image/clear", get(clear_image_handler))
}
