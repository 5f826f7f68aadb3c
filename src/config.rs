//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Runtime environment, selected via `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,

    /// Runtime environment (development | production)
    pub environment: Environment,

    /// Rate-limit window length
    pub rate_limit_window: Duration,

    /// Accepted requests per window per client
    pub max_requests_per_window: usize,

    /// Directory holding the SQLite store
    pub data_dir: PathBuf,

    /// SQLite store file name
    pub db_name: String,

    /// CORS allowed origin ("*" for any)
    pub cors_allowed_origin: String,

    /// Shared secret for the stats endpoint
    pub api_key: String,

    /// Directory for periodic store backups
    pub backup_dir: PathBuf,

    /// Number of backup copies to retain
    pub backup_retention: usize,
}

const DEFAULT_API_KEY: &str = "dev_key";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let environment = match std::env::var("NODE_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let window_ms: u64 = std::env::var("RATE_LIMIT_WINDOW")
            .unwrap_or_else(|_| "60000".to_string())
            .parse()
            .context("RATE_LIMIT_WINDOW must be a duration in milliseconds")?;

        let max_requests_per_window: usize = std::env::var("MAX_REQUESTS_PER_WINDOW")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("MAX_REQUESTS_PER_WINDOW must be a count")?;

        let db_name = std::env::var("DB_NAME").unwrap_or_else(|_| "waitlist.db".to_string());

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| match environment {
                Environment::Development => PathBuf::from("dev_data"),
                Environment::Production => PathBuf::from("prod_data"),
            });

        let cors_allowed_origin =
            std::env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let api_key = std::env::var("API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());

        if api_key == DEFAULT_API_KEY && environment == Environment::Production {
            tracing::warn!("⚠ API_KEY is the default dev key — change it for production!");
        }

        let backup_dir = std::env::var("BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("backups"));

        let backup_retention: usize = std::env::var("BACKUP_RETENTION")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .context("BACKUP_RETENTION must be a count")?;

        Ok(Self {
            port,
            environment,
            rate_limit_window: Duration::from_millis(window_ms),
            max_requests_per_window,
            data_dir,
            db_name,
            cors_allowed_origin,
            api_key,
            backup_dir,
            backup_retention,
        })
    }

    /// Full path of the SQLite store file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_name)
    }
}
