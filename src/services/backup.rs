//! Periodic store backups.
//!
//! Copies the SQLite file into the backup directory on a daily schedule and
//! prunes old copies so only the most recent N remain. I/O failures are
//! logged and the loop keeps running; backups never crash the process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

const BACKUP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
const BACKUP_PREFIX: &str = "waitlist-";

/// Copy the store file into `backup_dir` and prune to `retention` copies.
/// Returns the path of the new backup file.
pub fn create_backup(db_path: &Path, backup_dir: &Path, retention: usize) -> Result<PathBuf> {
    std::fs::create_dir_all(backup_dir)
        .with_context(|| format!("Failed to create backup directory {}", backup_dir.display()))?;

    let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3f");
    let backup_file = backup_dir.join(format!("{BACKUP_PREFIX}{timestamp}.db"));

    std::fs::copy(db_path, &backup_file)
        .with_context(|| format!("Failed to copy store to {}", backup_file.display()))?;

    prune_backups(backup_dir, retention)?;

    info!("Backup written: {}", backup_file.display());
    Ok(backup_file)
}

/// Remove all but the most recent `retention` backup files. Timestamped
/// names sort lexicographically, so name order is age order.
fn prune_backups(backup_dir: &Path, retention: usize) -> Result<()> {
    let mut backups: Vec<PathBuf> = std::fs::read_dir(backup_dir)
        .with_context(|| format!("Failed to read backup directory {}", backup_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(BACKUP_PREFIX) && n.ends_with(".db"))
        })
        .collect();

    backups.sort();

    let excess = backups.len().saturating_sub(retention);
    for old in &backups[..excess] {
        warn!("Pruning old backup: {}", old.display());
        std::fs::remove_file(old)
            .with_context(|| format!("Failed to remove old backup {}", old.display()))?;
    }

    Ok(())
}

/// Daily backup task. Runs for the life of the process.
pub async fn run_backup_loop(db_path: PathBuf, backup_dir: PathBuf, retention: usize) {
    let mut interval = tokio::time::interval(BACKUP_INTERVAL);
    interval.tick().await; // first tick fires immediately

    loop {
        interval.tick().await;
        if let Err(e) = create_backup(&db_path, &backup_dir, retention) {
            warn!("Backup failed: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "waitlist-backup-test-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn backup_copies_store_file() {
        let dir = temp_dir("copy");
        let db_path = dir.join("waitlist.db");
        std::fs::write(&db_path, b"store bytes").unwrap();

        let backup_dir = dir.join("backups");
        let backup = create_backup(&db_path, &backup_dir, 7).unwrap();

        assert_eq!(std::fs::read(&backup).unwrap(), b"store bytes");
        let name = backup.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(BACKUP_PREFIX) && name.ends_with(".db"));
    }

    #[test]
    fn prune_keeps_most_recent_backups() {
        let backup_dir = temp_dir("prune");
        for i in 0..10 {
            std::fs::write(backup_dir.join(format!("waitlist-000{i}.db")), b"x").unwrap();
        }
        // Unrelated files are left alone.
        std::fs::write(backup_dir.join("notes.txt"), b"x").unwrap();

        prune_backups(&backup_dir, 7).unwrap();

        let mut names: Vec<String> = std::fs::read_dir(&backup_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "notes.txt",
                "waitlist-0003.db",
                "waitlist-0004.db",
                "waitlist-0005.db",
                "waitlist-0006.db",
                "waitlist-0007.db",
                "waitlist-0008.db",
                "waitlist-0009.db",
            ]
        );
    }

    #[test]
    fn prune_with_fewer_than_retention_keeps_all() {
        let backup_dir = temp_dir("few");
        for i in 0..3 {
            std::fs::write(backup_dir.join(format!("waitlist-000{i}.db")), b"x").unwrap();
        }

        prune_backups(&backup_dir, 7).unwrap();

        assert_eq!(std::fs::read_dir(&backup_dir).unwrap().count(), 3);
    }

    #[test]
    fn backup_missing_store_fails() {
        let dir = temp_dir("missing");
        let err = create_backup(&dir.join("nope.db"), &dir.join("backups"), 7);
        assert!(err.is_err());
    }
}
