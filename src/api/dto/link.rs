//! DTOs for link management endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, LinkRequest};

/// Request to create or overwrite a link.
///
/// An empty `short` asks the service to generate a code. A blank `long` is
/// rejected by the service after the ownership check.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[serde(default)]
    #[validate(length(max = 64, message = "Short code is too long"))]
    pub short: String,

    #[validate(length(max = 8192, message = "Target URL is too long"))]
    pub long: String,
}

impl From<CreateLinkRequest> for LinkRequest {
    fn from(req: CreateLinkRequest) -> Self {
        Self {
            short: req.short,
            long: req.long,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub status: &'static str,
    /// True if an existing link was replaced.
    pub existed: bool,
    pub link: Link,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Existence probe result. Owner fields are only present for existing links.
#[derive(Debug, Serialize)]
pub struct LinkExistsResponse {
    pub exists: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl From<Option<Link>> for LinkExistsResponse {
    fn from(link: Option<Link>) -> Self {
        match link {
            Some(link) => Self {
                exists: true,
                url: Some(link.long),
                user: Some(link.user_id),
                user_name: Some(link.user_name),
            },
            None => Self {
                exists: false,
                url: None,
                user: None,
                user_name: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserLinksResponse {
    pub status: &'static str,
    pub links: Vec<Link>,
}
