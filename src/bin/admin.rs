//! CLI administration tool for pet-adoption.
//!
//! Provides commands for managing user roles, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # List registered users
//! cargo run --bin admin -- user list
//!
//! # Grant the admin role
//! cargo run --bin admin -- user promote alice@example.com
//!
//! # Ban a user
//! cargo run --bin admin -- user ban mallory@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use pet_adoption::domain::entities::{Role, User, normalize_email};
use pet_adoption::domain::repositories::UserRepository;
use pet_adoption::infrastructure::persistence::PgUserRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing pet-adoption.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage users
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
enum UserAction {
    /// List all users
    List,

    /// Grant the admin role
    Promote {
        /// Email of the user to promote
        email: String,
    },

    /// Ban a user from signing in
    Ban {
        /// Email of the user to ban
        email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::List => list_users(repo).await?,
        UserAction::Promote { email } => promote_user(repo, &email).await?,
        UserAction::Ban { email, yes } => ban_user(repo, &email, yes).await?,
    }

    Ok(())
}

async fn find_user(repo: &PgUserRepository, email: &str) -> Result<User> {
    repo.find_by_email(&normalize_email(email))
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("User '{email}' not found"))
}

/// Lists all users with role and ban status.
///
/// # Output Format
///
/// ```text
/// Users
///
///   Email                          Name                 Role    Status
///   ----------------------------------------------------------------------
///   alice@example.com              Alice                admin   ACTIVE
///   mallory@example.com            Mallory              user    BANNED
/// ```
async fn list_users(repo: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users registered".yellow());
        return Ok(());
    }

    println!(
        "  {:<30} {:<20} {:<7} {:<10}",
        "Email".bright_white().bold(),
        "Name".bright_white().bold(),
        "Role".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(70).bright_black());

    for user in &users {
        let status = if user.banned {
            "BANNED".red()
        } else {
            "ACTIVE".green()
        };
        let role = match user.role {
            Role::Admin => user.role.as_str().bright_magenta(),
            Role::User => user.role.as_str().normal(),
        };

        println!(
            "  {:<30} {:<20} {:<7} {}",
            user.email.cyan(),
            user.name,
            role,
            status
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn promote_user(repo: Arc<PgUserRepository>, email: &str) -> Result<()> {
    let user = find_user(&repo, email).await?;

    if user.is_admin() {
        println!("{}", "User is already an admin".yellow());
        return Ok(());
    }

    repo.set_role(&user.id, Role::Admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to promote user: {}", e))?;

    println!(
        "{} {}",
        "Promoted to admin:".green().bold(),
        user.email.cyan()
    );

    Ok(())
}

/// Bans a user after confirmation.
///
/// Banned users keep their data but can no longer obtain access tokens.
async fn ban_user(repo: Arc<PgUserRepository>, email: &str, skip_confirm: bool) -> Result<()> {
    let user = find_user(&repo, email).await?;

    if user.banned {
        println!("{}", "This user is already banned".yellow());
        return Ok(());
    }

    println!("  User: {}", user.email.cyan());
    println!("  ID:   {}", user.id.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Ban this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    repo.set_banned(&user.id, true)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to ban user: {}", e))?;

    println!("{}", "User banned".green().bold());

    Ok(())
}

/// Displays row counts per collection and the total amount donated.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    for (label, table) in [
        ("Users", "users"),
        ("Pets", "pets"),
        ("Adoption requests", "adoption_requests"),
        ("Campaigns", "donation_campaigns"),
        ("Donations", "donators"),
    ] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await?;
        println!("  {:<18} {}", label, count.to_string().bright_green().bold());
    }

    let donated: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(donated_amount), 0)::BIGINT FROM donation_campaigns")
            .fetch_one(pool)
            .await?;
    println!(
        "  {:<18} {} (minor units)",
        "Donated",
        donated.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
