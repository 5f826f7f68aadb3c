//! Administrative operations for the CLI.
//!
//! These act on the store directly and bypass the submission handler's
//! validation and rate limiting.

use std::path::Path;

use anyhow::{bail, Result};
use sqlx::SqlitePool;

use crate::config::Environment;
use crate::db::queries;
use crate::services::export::export_signups;

/// Print all waitlist entries.
pub async fn view(pool: &SqlitePool) -> Result<()> {
    let signups = queries::signup::list_signups(pool).await?;

    println!("\nWaitlist Entries:");
    println!("----------------");

    if signups.is_empty() {
        println!("No entries found.");
        println!("----------------");
        return Ok(());
    }

    for signup in &signups {
        println!("ID: {}", signup.id);
        println!("Email: {}", signup.email);
        println!(
            "Signed up: {}",
            signup.signup_date.format("%Y-%m-%d %H:%M:%S UTC")
        );
        println!("IP: {}", signup.ip_address.as_deref().unwrap_or("N/A"));
        println!("----------------");
    }

    Ok(())
}

/// Export all entries to a CSV file in `output_dir`.
pub async fn export(
    pool: &SqlitePool,
    output_dir: &Path,
    environment: Environment,
) -> Result<()> {
    let path = export_signups(pool, output_dir, environment).await?;
    println!("Exported to: {}", path.display());
    Ok(())
}

/// Delete one entry, addressed by email or by id.
pub async fn delete(pool: &SqlitePool, email: Option<String>, id: Option<i64>) -> Result<()> {
    let removed = match (email, id) {
        (Some(email), None) => {
            let removed = queries::signup::delete_by_email(pool, &email).await?;
            println!("Deleted {removed} entry(s) with email: {email}");
            removed
        }
        (None, Some(id)) => {
            let removed = queries::signup::delete_by_id(pool, id).await?;
            println!("Deleted {removed} entry(s) with id: {id}");
            removed
        }
        _ => bail!("Provide exactly one of --email or --id"),
    };

    if removed == 0 {
        println!("No matching entry found.");
    }

    Ok(())
}
