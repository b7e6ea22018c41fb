//! Bearer token authentication middleware and the authenticated-user extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderName, HeaderValue, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{domain::entities::User, error::AppError, state::AppState};

/// Response header carrying the authenticated user id.
pub const X_SHORT_SUB: &str = "x-short-sub";
/// Response header carrying a username: the caller's on authenticated
/// responses, the link owner's on redirects.
pub const X_SHORT_USER: &str = "x-short-user";

/// Resolves the caller from an optional Bearer token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <jwt>
/// ```
///
/// # Authentication Flow
///
/// 1. Requests without an `Authorization` header continue anonymously
/// 2. The token signature and expiry are verified
/// 3. The decoded [`User`] is stored in request extensions
/// 4. The response is tagged with `X-Short-Sub` and `X-Short-User`
///
/// Handlers that need a caller extract [`AuthUser`].
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is present but malformed, or if
/// the token fails verification.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.headers().contains_key(AUTHORIZATION) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is invalid"}),
            )
        })?;

    let user = st.auth_service.verify(&token)?;
    let sub = HeaderValue::from_str(&user.id).ok();
    let username = HeaderValue::from_str(user.display_name()).ok();

    tracing::debug!(user = %user.id, "Authenticated request");
    parts.extensions.insert(user);

    let mut response = next.run(Request::from_parts(parts, body)).await;

    let headers = response.headers_mut();
    if let Some(sub) = sub {
        headers.insert(HeaderName::from_static(X_SHORT_SUB), sub);
    }
    if let Some(username) = username {
        headers
            .entry(HeaderName::from_static(X_SHORT_USER))
            .or_insert(username);
    }

    Ok(response)
}

/// Extracts the caller resolved by [`layer`].
///
/// Rejects with `401 Unauthorized` when the request carried no token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    serde_json::json!({"reason": "Authorization header is missing"}),
                )
            })
    }
}
