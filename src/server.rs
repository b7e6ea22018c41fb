//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, service wiring, and the Axum server lifecycle.

use crate::application::services::{AuthService, ImageService, LinkService};
use crate::config::Config;
use crate::domain::image_provider::ImageProvider;
use crate::domain::repositories::{ImageRepository, LinkRepository};
use crate::infrastructure::persistence::{
    MemoryImageRepository, MemoryLinkRepository, PgImageRepository, PgLinkRepository,
};
use crate::infrastructure::unsplash::UnsplashClient;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::CodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens a connection pool sized by the `DB_*` settings.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .acquire_timeout(config.pool.acquire_timeout)
        .idle_timeout(config.pool.idle_timeout)
        .max_lifetime(config.pool.max_lifetime)
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Selects PostgreSQL or in-memory storage.
async fn build_repositories(
    config: &Config,
) -> Result<(Arc<dyn LinkRepository>, Arc<dyn ImageRepository>)> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, links are kept in memory");
        return Ok((
            Arc::new(MemoryLinkRepository::new()),
            Arc::new(MemoryImageRepository::new()),
        ));
    };

    let pool = connect_pool(config, database_url).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    Ok((
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgImageRepository::new(pool)),
    ))
}

/// Wires repositories, the image provider and services into [`AppState`].
///
/// # Errors
///
/// Returns an error if storage is unreachable, the JWT public key cannot be
/// parsed, or the provider client cannot be built.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let (link_repository, image_repository) = build_repositories(config).await?;

    let auth_service = AuthService::from_rsa_public_key(&config.jwt_public_key)
        .context("JWT_PUBLIC_KEY is not a valid RSA public key")?;

    let provider: Arc<dyn ImageProvider> = Arc::new(
        UnsplashClient::new(
            &config.unsplash_access_key,
            config.unsplash_api_url.clone(),
            config.unsplash_collections.clone(),
        )
        .context("Failed to build Unsplash client")?,
    );

    let link_service = LinkService::new(
        link_repository,
        CodeGenerator::new(),
        config.auth_role_resource.clone(),
    );
    let image_service = ImageService::new(
        image_repository,
        provider,
        Duration::from_secs(config.image_cache_ttl_seconds),
    );

    Ok(AppState::new(
        Arc::new(link_service),
        Arc::new(image_service),
        Arc::new(auth_service),
    )
    .with_require_create_role(config.require_create_role)
    .with_ui_url(config.ui_url.clone()))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or in-memory storage)
/// - JWT verification
/// - Unsplash client
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
