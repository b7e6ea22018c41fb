//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Redirect to the front-end (when configured)
//! - `GET  /{code}`  - Short link redirect (public)
//! - `GET  /health`  - Health check (public)
//! - `/link/*`, `/user/*`, `/image/*` - API, see [`crate::api::routes`]
//!
//! # Middleware
//!
//! - **CORS** - Any origin, Bearer credentials
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Optional Bearer token resolved into a user
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler, root_redirect_handler};
use crate::api::middleware::{auth, cors, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes with authentication, tracing and CORS.
///
/// Static paths such as `/health` take priority over `/{code}`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_redirect_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .merge(api::routes::routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state)
        .layer(tracing::layer())
        .layer(cors::layer())
}

/// Constructs the served application: [`router`] plus rate limiting and
/// trailing-slash normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let router = router(state).layer(rate_limit::layer(behind_proxy));

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
