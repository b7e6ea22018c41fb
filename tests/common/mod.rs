#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, encode};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use short_links::application::services::{AuthService, ImageService, LinkService};
use short_links::domain::entities::{ProviderPhoto, Role};
use short_links::domain::image_provider::{ImageProvider, ProviderError};
use short_links::infrastructure::persistence::{MemoryImageRepository, MemoryLinkRepository};
use short_links::routes::router;
use short_links::state::AppState;
use short_links::utils::code_generator::CodeGenerator;

pub const SIGNING_SECRET: &[u8] = b"integration-test-secret";
pub const ROLE_RESOURCE: &str = "short";

/// Image provider returning numbered photos without network access.
#[derive(Default)]
pub struct StubProvider {
    pub calls: AtomicUsize,
    pub failing: AtomicBool,
}

#[async_trait]
impl ImageProvider for StubProvider {
    async fn random_photo(&self) -> Result<ProviderPhoto, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Status {
                status: 401,
                body: "OAuth error: The access token is invalid".to_string(),
            });
        }

        Ok(ProviderPhoto {
            url: format!("https://images.example.com/photo-{n}.jpg"),
            photographer_name: "Jane Doe".to_string(),
            photographer_username: "janedoe".to_string(),
        })
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub provider: Arc<StubProvider>,
}

pub fn create_test_state(provider: Arc<StubProvider>, image_ttl: Duration) -> AppState {
    let link_service = LinkService::new(
        Arc::new(MemoryLinkRepository::new()),
        CodeGenerator::from_seed(7),
        ROLE_RESOURCE,
    );
    let image_service = ImageService::new(
        Arc::new(MemoryImageRepository::new()),
        provider,
        image_ttl,
    );
    let auth_service = AuthService::new(
        DecodingKey::from_secret(SIGNING_SECRET),
        Algorithm::HS256,
    );

    AppState::new(
        Arc::new(link_service),
        Arc::new(image_service),
        Arc::new(auth_service),
    )
}

pub fn spawn_app_with(configure: impl FnOnce(AppState) -> AppState) -> TestApp {
    let provider = Arc::new(StubProvider::default());
    let state = configure(create_test_state(
        provider.clone(),
        Duration::from_secs(3600),
    ));

    TestApp {
        server: TestServer::new(router(state)).unwrap(),
        provider,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(|state| state)
}

/// Signs a token for `sub` holding `roles` on the service resource.
pub fn token(sub: &str, username: &str, roles: &[Role]) -> String {
    let role_names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
    let claims = json!({
        "sub": sub,
        "preferred_username": username,
        "name": username,
        "scope": "openid profile",
        "exp": (Utc::now() + ChronoDuration::hours(1)).timestamp(),
        "resource_access": { "short": { "roles": role_names } },
    });

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_SECRET),
    )
    .unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn alice() -> String {
    bearer(&token("alice-id", "alice", &[Role::Create]))
}

pub fn bob() -> String {
    bearer(&token("bob-id", "bob", &[Role::Create]))
}

pub fn moderator() -> String {
    bearer(&token(
        "mod-id",
        "moderator",
        &[Role::Create, Role::Delete, Role::Overwrite, Role::ClearBackground],
    ))
}
