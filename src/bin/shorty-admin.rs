//! CLI administration tool for shorty.
//!
//! Provides commands for working with short codes, creating accounts,
//! viewing statistics, and performing database checks without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Encode / decode short codes (no database needed)
//! cargo run --bin shorty-admin -- code encode 42
//! cargo run --bin shorty-admin -- code decode 5pKs
//!
//! # Create an account (prompts for missing values)
//! cargo run --bin shorty-admin -- user create --email alice@example.com
//!
//! # View statistics
//! cargo run --bin shorty-admin -- stats
//!
//! # Check database connection
//! cargo run --bin shorty-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection, for everything but `code`
//! - `PASSWORD_SECRET`: required by `user create`

use shorty::api::dto::user::CreateUserRequest;
use shorty::application::services::{PasswordHasher, StatsService, UserService};
use shorty::config::{Config, mask_connection_string};
use shorty::domain::codec::ShortCodec;
use shorty::infrastructure::persistence::{PgStatsRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing shorty.
#[derive(Parser)]
#[command(name = "shorty-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Encode or decode short codes
    Code {
        #[command(subcommand)]
        action: CodeAction,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum CodeAction {
    /// Print the short code for a link id
    Encode { id: i64 },

    /// Print the link id behind a short code
    Decode { code: String },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new account
    Create {
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted without echo if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
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

    match cli.command {
        Commands::Code { action } => handle_code_action(action)?,
        Commands::User { action } => handle_user_action(action).await?,
        Commands::Stats => handle_stats(&connect().await?).await?,
        Commands::Db { action } => handle_db_action(action).await?,
    }

    Ok(())
}

/// Connects using the same database settings as the server.
async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })
}

fn handle_code_action(action: CodeAction) -> Result<()> {
    let codec = ShortCodec::default();

    match action {
        CodeAction::Encode { id } => {
            if id < 0 {
                anyhow::bail!("Link ids are non-negative, got {id}");
            }
            println!("{}", codec.encode(id).bright_yellow().bold());
        }
        CodeAction::Decode { code } => {
            let id = codec.decode(&code)?;
            println!("{}", id.to_string().bright_green().bold());
        }
    }

    Ok(())
}

async fn handle_user_action(action: UserAction) -> Result<()> {
    match action {
        UserAction::Create { email, password } => create_user(email, password).await,
    }
}

/// Creates an account, prompting for whatever was not given on the command line.
///
/// Applies the same validation as `POST /users`.
async fn create_user(email: Option<String>, password: Option<String>) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let secret = std::env::var("PASSWORD_SECRET").context("PASSWORD_SECRET must be set")?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    let request = CreateUserRequest { email, password };
    if let Err(errors) = request.validate() {
        anyhow::bail!("Invalid input: {errors}");
    }

    let pool = Arc::new(connect().await?);
    let service = UserService::new(
        Arc::new(PgUserRepository::new(pool)),
        PasswordHasher::new(secret),
    );

    let user = service
        .register(request.email, &request.password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:    {}", user.id.to_string().bright_white().bold());
    println!("  Email: {}", user.email.cyan());
    println!();

    Ok(())
}

/// Displays totals and the most clicked links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let stats = StatsService::new(Arc::new(PgStatsRepository::new(pool)));

    let totals = stats
        .totals()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load totals: {}", e))?;

    println!(
        "  Links:  {}",
        totals.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        totals.clicks.to_string().bright_green().bold()
    );
    println!();

    let top = stats
        .top_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load top links: {}", e))?;

    if top.is_empty() {
        println!("{}", "  No links yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:>8}  {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for row in &top {
        println!(
            "  {:<12} {:>8}  {}",
            row.link.code.cyan(),
            row.clicks.to_string().bright_green(),
            row.link.long_url
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction) -> Result<()> {
    let pool = connect().await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
