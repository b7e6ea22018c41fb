mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use short_links::domain::entities::Role;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_image_is_fetched_then_cached() {
    let app = common::spawn_app();

    let first = app.server.get("/image").await;
    first.assert_status_ok();
    let first = first.json::<Value>();

    assert_eq!(first["image_url"], "https://images.example.com/photo-1.jpg");
    assert_eq!(first["photographer_name"], "Jane Doe");
    assert_eq!(first["photographer_username"], "janedoe");
    assert_eq!(first["expiration_duration"], 3600);

    let second = app.server.get("/image").await.json::<Value>();

    assert_eq!(first, second);
    assert_eq!(app.provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_clear_forces_refetch() {
    let app = common::spawn_app();

    app.server.get("/image").await.assert_status_ok();

    app.server
        .get("/image/clear")
        .add_header("Authorization", common::moderator())
        .await
        .assert_status_ok();

    let refreshed = app.server.get("/image").await.json::<Value>();

    assert_eq!(
        refreshed["image_url"],
        "https://images.example.com/photo-2.jpg"
    );
    assert_eq!(app.provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_clear_requires_role() {
    let app = common::spawn_app();

    app.server
        .get("/image/clear")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/image/clear")
        .add_header("Authorization", common::alice())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let token = common::bearer(&common::token(
        "ops-id",
        "ops",
        &[Role::ClearBackground],
    ));
    let response = app
        .server
        .get("/image/clear")
        .add_header("Authorization", token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"status": "ok"}));
}

#[tokio::test]
async fn test_provider_failure_is_recoverable() {
    let app = common::spawn_app();
    app.provider.failing.store(true, Ordering::SeqCst);

    let response = app.server.get("/image").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["code"], "internal_error");

    app.provider.failing.store(false, Ordering::SeqCst);

    app.server.get("/image").await.assert_status_ok();
    app.server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_expired_image_is_refreshed() {
    let provider = std::sync::Arc::new(common::StubProvider::default());
    let state = common::create_test_state(provider.clone(), std::time::Duration::from_secs(1));
    let server = axum_test::TestServer::new(short_links::routes::router(state)).unwrap();

    let first = server.get("/image").await.json::<Value>();
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let second = server.get("/image").await.json::<Value>();

    assert_ne!(first["image_url"], second["image_url"]);
    assert_ne!(first["updated_at"], second["updated_at"]);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}
