//! Waitlist backend - HTTP server and admin CLI for the landing-page
//! email waitlist.

mod cli;
mod config;
mod db;
mod error;
mod handlers;
mod manage;
mod services;
mod types;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sqlx::SqlitePool;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::rate_limiter::RateLimiter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "server.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - both stdout and file
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,waitlist_server=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer()) // stdout
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        ) // file
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Open the store; failure here is fatal
    let pool = db::create_pool(&config.db_path()).await?;
    info!("Connected to database: {}", config.db_path().display());

    db::run_migrations(&pool).await?;

    match cli.command.unwrap_or(cli::Command::Serve) {
        cli::Command::Serve => run_server(config, pool).await,
        cli::Command::Migrate => {
            // Migrations already ran above.
            println!("Migrations complete: {}", config.db_path().display());
            Ok(())
        }
        cli::Command::View => manage::view(&pool).await,
        cli::Command::Export { output } => {
            manage::export(&pool, &output, config.environment).await
        }
        cli::Command::Delete { email, id } => manage::delete(&pool, email, id).await,
    }
}

async fn run_server(config: Config, pool: SqlitePool) -> Result<()> {
    let config = Arc::new(config);
    let limiter = Arc::new(RateLimiter::new(
        config.max_requests_per_window,
        config.rate_limit_window,
    ));

    // Periodic sweep bounds the rate-limit table's memory.
    tokio::spawn(services::rate_limiter::run_sweep_loop(Arc::clone(&limiter)));

    // Daily store backups, production only.
    if !config.environment.is_development() {
        tokio::spawn(services::backup::run_backup_loop(
            config.db_path(),
            config.backup_dir.clone(),
            config.backup_retention,
        ));
    }

    info!(
        "Server starting in {} mode on port {}",
        config.environment.as_str(),
        config.port
    );
    info!("CORS allowed origin: {}", config.cors_allowed_origin);
    if config.environment.is_development() {
        info!("Development mode: stats API key check disabled");
    }

    let state = handlers::AppState {
        pool,
        config,
        limiter,
    };

    handlers::serve(state).await
}
