//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, ImageService, LinkService};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub image_service: Arc<ImageService>,
    pub auth_service: Arc<AuthService>,
    /// Gate `POST /link` on the create role.
    pub require_create_role: bool,
    /// Front-end address that `GET /` redirects to.
    pub ui_url: Option<String>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        image_service: Arc<ImageService>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            link_service,
            image_service,
            auth_service,
            require_create_role: true,
            ui_url: None,
        }
    }

    pub fn with_require_create_role(mut self, require: bool) -> Self {
        self.require_create_role = require;
        self
    }

    pub fn with_ui_url(mut self, ui_url: Option<String>) -> Self {
        self.ui_url = ui_url;
        self
    }
}
