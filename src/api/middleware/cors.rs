//! Cross-origin policy for browser front-ends.

use axum::http::{
    HeaderName, Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::redirect::X_SHORT_LINK;
use crate::api::middleware::auth::X_SHORT_USER;

/// Allows any origin to call the API with a Bearer token.
///
/// The redirect metadata headers are exposed so the UI can read them.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_methods([Method::OPTIONS, Method::GET, Method::POST, Method::DELETE])
        .expose_headers([
            HeaderName::from_static(X_SHORT_LINK),
            HeaderName::from_static(X_SHORT_USER),
        ])
}
