//! Handlers for short URL redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::api::middleware::auth::X_SHORT_USER;
use crate::error::AppError;
use crate::state::AppState;

/// Response header carrying the resolved short code.
pub const X_SHORT_LINK: &str = "x-short-link";

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// `302 Found` with:
///
/// - `Location` - the target URL
/// - `x-short-link` - the resolved code
/// - `x-short-user` - the owner's username
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&code).await?;
    debug!(code = %link.short, target = %link.long, "Redirecting");

    let location = location_header(&link.long)?;

    let mut response = StatusCode::FOUND.into_response();
    let headers = response.headers_mut();
    headers.insert(LOCATION, location);
    if let Ok(short) = HeaderValue::from_str(&link.short) {
        headers.insert(HeaderName::from_static(X_SHORT_LINK), short);
    }
    if let Ok(user) = HeaderValue::from_str(&link.user_name) {
        headers.insert(HeaderName::from_static(X_SHORT_USER), user);
    }

    Ok(response)
}

/// Sends visitors of the bare domain to the front-end.
///
/// # Endpoint
///
/// `GET /`
///
/// # Errors
///
/// Returns 404 Not Found when no UI address is configured.
pub async fn root_redirect_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let Some(ui_url) = state.ui_url.as_deref() else {
        return Err(AppError::not_found("Not found", json!({})));
    };

    let mut response = StatusCode::FOUND.into_response();
    response
        .headers_mut()
        .insert(LOCATION, location_header(ui_url)?);

    Ok(response)
}

/// Builds a `Location` value, percent-encoding targets that are not valid
/// header text as stored.
fn location_header(target: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(target).or_else(|_| {
        url::Url::parse(target)
            .ok()
            .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
            .ok_or_else(|| {
                AppError::internal(
                    "Stored target URL cannot be sent",
                    json!({ "target": target }),
                )
            })
    })
}
