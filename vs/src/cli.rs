//! CLI argument parsing for the vs inspection binary

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::OriginSpec;

#[derive(Parser, Debug)]
#[command(name = "vs")]
#[command(author, version, about = "Markdown vault document store inspector", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Vault root (overrides config)
    #[arg(long)]
    pub vault: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List documents contributed by one origin
    List {
        /// Subtree path relative to the vault root (default: whole vault)
        #[arg(long, conflicts_with_all = ["tag", "date_pattern", "glob"])]
        subtree: Option<String>,

        /// Inline tag, without the leading '#'
        #[arg(long)]
        tag: Option<String>,

        /// strftime pattern matched against filename stems
        #[arg(long = "date-pattern")]
        date_pattern: Option<String>,

        /// Glob pattern matched against document ids
        #[arg(long)]
        glob: Option<String>,
    },

    /// Print a document's text
    Cat {
        /// Document id (path relative to the vault root)
        #[arg(required = true)]
        id: String,
    },

    /// Show a document's recency timestamp and size
    Stat {
        /// Document id (path relative to the vault root)
        #[arg(required = true)]
        id: String,
    },
}

impl Command {
    /// Resolve the origin a `list` invocation asks for
    pub fn origin(&self) -> Option<OriginSpec> {
        match self {
            Command::List {
                subtree,
                tag,
                date_pattern,
                glob,
            } => Some(if let Some(tag) = tag {
                OriginSpec::Tagged { tag: tag.clone() }
            } else if let Some(pattern) = date_pattern {
                OriginSpec::DatePattern {
                    pattern: pattern.clone(),
                }
            } else if let Some(pattern) = glob {
                OriginSpec::Glob {
                    pattern: pattern.clone(),
                }
            } else {
                OriginSpec::Subtree {
                    path: subtree.clone().unwrap_or_default(),
                }
            }),
            _ => None,
        }
    }
}
