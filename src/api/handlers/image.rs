//! Handlers for the cached background image.

use axum::{Json, extract::State};
use serde_json::json;

use crate::api::dto::link::StatusResponse;
use crate::api::middleware::auth::AuthUser;
use crate::domain::entities::{CachedImage, Role};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the cached image, fetching a new one when it has expired.
///
/// # Endpoint
///
/// `GET /image`
///
/// # Response
///
/// ```json
/// {
///   "image_url": "https://images.unsplash.com/photo-...",
///   "photographer_name": "Jane Doe",
///   "photographer_username": "janedoe",
///   "updated_at": "2024-05-01T12:00:00Z",
///   "expiration_duration": 43200
/// }
/// ```
///
/// # Errors
///
/// Returns 500 if the provider or the store fails.
pub async fn image_handler(State(state): State<AppState>) -> Result<Json<CachedImage>, AppError> {
    Ok(Json(state.image_service.get_image().await?))
}

/// Invalidates the cached image.
///
/// # Endpoint
///
/// `GET /image/clear`
///
/// # Errors
///
/// - **401**: no valid Bearer token
/// - **403**: missing clear-background role
pub async fn clear_image_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<StatusResponse>, AppError> {
    if !user.has_role(state.link_service.role_resource(), Role::ClearBackground) {
        return Err(AppError::forbidden(
            "Missing required role",
            json!({ "role": Role::ClearBackground.as_str() }),
        ));
    }

    state.image_service.clear().await?;

    Ok(Json(StatusResponse::ok()))
}
