//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Taskscan - vault task scanner
#[derive(Parser)]
#[command(
    name = "ts",
    about = "Paged task discovery and top-task ranking over a markdown vault",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Vault root (overrides config)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Page through matching tasks
    Scan {
        /// Fetch every page instead of just the first
        #[arg(long)]
        all: bool,

        /// Batch target per page (default: scan.page-size from config)
        #[arg(short, long)]
        page_size: Option<usize>,

        /// Restrict to documents in the current period
        #[arg(long)]
        today: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Scan to exhaustion and show the current top task
    Top {
        /// Restrict to documents in the current period
        #[arg(long)]
        today: bool,
    },

    /// Print the ordered candidate document list
    Sources {
        /// Restrict to documents in the current period
        #[arg(long)]
        today: bool,
    },
}

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_defaults() {
        let cli = Cli::parse_from(["ts", "scan"]);
        match cli.command {
            Command::Scan {
                all,
                page_size,
                today,
                format,
            } => {
                assert!(!all);
                assert_eq!(page_size, None);
                assert!(!today);
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_global_vault_override() {
        let cli = Cli::parse_from(["ts", "top", "--vault", "/tmp/vault"]);
        assert_eq!(cli.vault, Some(PathBuf::from("/tmp/vault")));
    }

    #[test]
    fn test_scan_json_format() {
        let cli = Cli::parse_from(["ts", "scan", "--format", "json", "--all"]);
        match cli.command {
            Command::Scan { all, format, .. } => {
                assert!(all);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected scan"),
        }
    }
}
