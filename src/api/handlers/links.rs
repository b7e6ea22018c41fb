//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{
    CreateLinkRequest, CreateLinkResponse, LinkExistsResponse, StatusResponse, UserLinksResponse,
};
use crate::api::middleware::auth::AuthUser;
use crate::domain::entities::Role;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a link, or overwrites an existing one.
///
/// # Endpoint
///
/// `POST /link`
///
/// # Request Body
///
/// ```json
/// { "short": "docs", "long": "https://example.com/docs" }
/// ```
///
/// Omit `short` (or send `""`) to have a code generated.
///
/// # Response
///
/// ```json
/// {
///   "status": "ok",
///   "existed": false,
///   "link": { "short": "docs", "long": "https://example.com/docs", "user": "a1b2", "user_name": "alice" }
/// }
/// ```
///
/// # Errors
///
/// - **400**: malformed body, invalid code or target URL
/// - **401**: no valid Bearer token
/// - **403**: missing create role (when required), or the code belongs to
///   another user and the caller lacks the overwrite role
pub async fn create_link_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<CreateLinkResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    if state.require_create_role
        && !user.has_role(state.link_service.role_resource(), Role::Create)
    {
        return Err(AppError::forbidden(
            "Missing required role",
            json!({ "role": Role::Create.as_str() }),
        ));
    }

    let created = state
        .link_service
        .create_link(payload.into(), &user)
        .await?;

    Ok(Json(CreateLinkResponse {
        status: "ok",
        existed: created.existed,
        link: created.link,
    }))
}

/// Deletes a link owned by the caller, or any link with the delete role.
///
/// # Endpoint
///
/// `DELETE /link/{code}`
///
/// # Errors
///
/// - **401**: no valid Bearer token
/// - **403**: not the owner and no delete role
/// - **404**: unknown code
pub async fn delete_link_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(code): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    state.link_service.delete_link(&code, &user).await?;

    Ok(Json(StatusResponse::ok()))
}

/// Reports whether a code is taken, and by whom.
///
/// # Endpoint
///
/// `GET /link/{code}/exists`
pub async fn link_exists_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkExistsResponse>, AppError> {
    let link = state.link_service.find(&code).await?;

    Ok(Json(link.into()))
}

/// Lists the caller's links ordered by code.
///
/// # Endpoint
///
/// `GET /user/links`
pub async fn user_links_handler(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserLinksResponse>, AppError> {
    let links = state.link_service.list_owned(&user).await?;

    Ok(Json(UserLinksResponse {
        status: "ok",
        links,
    }))
}
