use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use vaultstore::cli::{Cli, Command};
use vaultstore::config::Config;
use vaultstore::{DocumentStore, VaultStore};

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let root = cli.vault.clone().unwrap_or(config.vault_root);

    info!(root = %root.display(), "vaultstore starting");
    let store = VaultStore::open(&root)?;

    match &cli.command {
        cmd @ Command::List { .. } => {
            let origin = cmd.origin().unwrap_or(vaultstore::OriginSpec::Subtree { path: String::new() });
            let ids = store.list_documents(&origin).await?;
            for id in &ids {
                println!("{}", id);
            }
            eprintln!("{} {} document(s) from {}", "✓".green(), ids.len(), origin.to_string().cyan());
        }
        Command::Cat { id } => {
            let text = store.read_document(id).await?;
            print!("{}", text);
        }
        Command::Stat { id } => {
            let text = store.read_document(id).await?;
            let recency = store.document_recency(id).await?;
            println!("{}: {}", "id".dimmed(), id.cyan());
            println!("{}: {}", "modified".dimmed(), recency.to_rfc3339());
            println!("{}: {} bytes, {} lines", "size".dimmed(), text.len(), text.lines().count());
        }
    }

    Ok(())
}
