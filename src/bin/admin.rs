//! CLI administration tool for short-links.
//!
//! Inspects and manages links and the cached background image directly in
//! the database, without going through the HTTP API and its role checks.
//!
//! # Usage
//!
//! ```bash
//! # List all links, or the links of one user
//! cargo run --bin admin -- link list
//! cargo run --bin admin -- link list --user 5f1c...
//!
//! # Delete a link
//! cargo run --bin admin -- link delete docs
//!
//! # Show or invalidate the cached image
//! cargo run --bin admin -- image show
//! cargo run --bin admin -- image clear
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)

use short_links::config::{Config, mask_connection_string};
use short_links::domain::entities::{CachedImage, Link};
use short_links::domain::repositories::{ImageRepository, LinkRepository};
use short_links::infrastructure::persistence::{PgImageRepository, PgLinkRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing short-links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Manage the cached background image
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links
    List {
        /// Only show links owned by this user id
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Delete a link
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ImageAction {
    /// Show the cached image
    Show,

    /// Invalidate the cached image so the next request fetches a new one
    Clear,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        Config::load_database_url()?.context("DATABASE_URL or DB_HOST must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Image { action } => handle_image_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinkAction::List { user } => list_links(&repo, pool, user).await?,
        LinkAction::Delete { code, yes } => delete_link(&repo, &code, yes).await?,
    }

    Ok(())
}

/// Lists links as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Short            Owner                Target
///   ──────────────────────────────────────────────────────────────────────────
///   docs             alice                https://example.com/docs
/// ```
async fn list_links(repo: &PgLinkRepository, pool: &PgPool, user: Option<String>) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = match user {
        Some(ref user_id) => repo
            .list_by_owner(user_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?,
        None => {
            sqlx::query_as::<_, Link>(
                "SELECT short, long, user_id, user_name FROM links ORDER BY short",
            )
            .fetch_all(pool)
            .await?
        }
    };

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<16} {:<20} {}",
        "Short".bright_white().bold(),
        "Owner".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let owner = if link.user_name.is_empty() {
            &link.user_id
        } else {
            &link.user_name
        };

        println!(
            "  {:<16} {:<20} {}",
            link.short.cyan(),
            owner.bright_black(),
            link.long
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(repo: &PgLinkRepository, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = repo
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    println!("  Short:  {}", link.short.cyan());
    println!("  Target: {}", link.long);
    println!("  Owner:  {} ({})", link.user_name, link.user_id.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

async fn handle_image_action(action: ImageAction, pool: &PgPool) -> Result<()> {
    let repo = PgImageRepository::new(Arc::new(pool.clone()));

    match action {
        ImageAction::Show => {
            println!("{}", "🖼️  Cached Image".bright_blue().bold());
            println!();

            let image = repo
                .get()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            if image.image_url.is_empty() {
                println!("{}", "  Cache is empty".yellow());
            } else {
                println!("  URL:          {}", image.image_url.cyan());
                println!(
                    "  Photographer: {} (@{})",
                    image.photographer_name, image.photographer_username
                );
                println!(
                    "  Updated:      {}",
                    image
                        .updated_at
                        .format("%Y-%m-%d %H:%M:%S UTC")
                        .to_string()
                        .bright_black()
                );
            }
            println!();
        }
        ImageAction::Clear => {
            repo.update(&CachedImage::empty(Duration::ZERO))
                .await
                .map_err(|e| anyhow::anyhow!("Failed to clear image: {}", e))?;

            println!("{}", "✅ Image cache cleared".green().bold());
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;
            let owners_count: i64 =
                sqlx::query_scalar("SELECT COUNT(DISTINCT user_id) FROM links")
                    .fetch_one(pool)
                    .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Links:      {}",
                links_count.to_string().bright_green().bold()
            );
            println!(
                "  Owners:     {}",
                owners_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
