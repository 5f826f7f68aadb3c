//! CLI argument parsing for the waitlist-server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "waitlist-server", about = "Landing-page waitlist backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server (default if no subcommand given)
    Serve,
    /// Run database migrations and exit
    Migrate,
    /// Print all waitlist entries
    View,
    /// Export all entries to a timestamped CSV file
    Export {
        /// Output directory
        #[arg(long, default_value = "exports")]
        output: PathBuf,
    },
    /// Delete one entry by email or id
    Delete {
        /// Email address to delete
        #[arg(long)]
        email: Option<String>,
        /// Row id to delete
        #[arg(long)]
        id: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_command_defaults_to_none() {
        let cli = Cli::parse_from(["waitlist-server"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_serve_command_parses() {
        let cli = Cli::parse_from(["waitlist-server", "serve"]);
        assert!(matches!(cli.command, Some(Command::Serve)));
    }

    #[test]
    fn test_cli_migrate_command_parses() {
        let cli = Cli::parse_from(["waitlist-server", "migrate"]);
        assert!(matches!(cli.command, Some(Command::Migrate)));
    }

    #[test]
    fn test_cli_export_defaults_output_dir() {
        let cli = Cli::parse_from(["waitlist-server", "export"]);
        match cli.command {
            Some(Command::Export { output }) => assert_eq!(output, PathBuf::from("exports")),
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_cli_delete_by_email_parses() {
        let cli = Cli::parse_from(["waitlist-server", "delete", "--email", "a@b.com"]);
        match cli.command {
            Some(Command::Delete { email, id }) => {
                assert_eq!(email.as_deref(), Some("a@b.com"));
                assert!(id.is_none());
            }
            _ => panic!("expected delete command"),
        }
    }

    #[test]
    fn test_cli_delete_by_id_parses() {
        let cli = Cli::parse_from(["waitlist-server", "delete", "--id", "42"]);
        match cli.command {
            Some(Command::Delete { email, id }) => {
                assert!(email.is_none());
                assert_eq!(id, Some(42));
            }
            _ => panic!("expected delete command"),
        }
    }
}
