//! CSV export of the waitlist.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::config::Environment;
use crate::db::queries;

/// Export all signups to a timestamped CSV file in `output_dir`.
/// Returns the path of the written file.
pub async fn export_signups(
    pool: &SqlitePool,
    output_dir: &Path,
    environment: Environment,
) -> Result<PathBuf> {
    let signups = queries::signup::list_signups(pool)
        .await
        .context("Failed to fetch signups for export")?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create export directory {}", output_dir.display()))?;

    let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S");
    let path = output_dir.join(format!("waitlist-{}-{timestamp}.csv", environment.as_str()));

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to create export file {}", path.display()))?;

    writer.write_record([
        "ID",
        "Email Address",
        "Signup Date (UTC)",
        "IP Address",
        "User Agent",
    ])?;

    for signup in &signups {
        writer.write_record([
            signup.id.to_string(),
            signup.email.clone(),
            signup.signup_date.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            signup.ip_address.clone().unwrap_or_default(),
            signup.user_agent.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    info!("Exported {} signups to {}", signups.len(), path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::types::NewSignup;

    #[tokio::test]
    async fn export_writes_header_and_rows() {
        let pool = test_pool().await;
        queries::signup::insert_signup(
            &pool,
            &NewSignup {
                email: "a@b.com".to_string(),
                ip_address: Some("127.0.0.1".to_string()),
                user_agent: None,
            },
        )
        .await
        .unwrap();

        let dir = std::env::temp_dir().join(format!(
            "waitlist-export-test-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let path = export_signups(&pool, &dir, Environment::Development)
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Email Address,Signup Date (UTC),IP Address,User Agent"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("1,a@b.com,"));
        assert!(row.contains("127.0.0.1"));

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("waitlist-development-") && name.ends_with(".csv"));
    }

    #[tokio::test]
    async fn export_of_empty_store_writes_header_only() {
        let pool = test_pool().await;
        let dir = std::env::temp_dir().join(format!(
            "waitlist-export-empty-test-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let path = export_signups(&pool, &dir, Environment::Production)
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
