//! Taskscan CLI entry point

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use taskscan::cli::{Cli, Command, OutputFormat};
use taskscan::config::Config;
use taskscan::domain::{RankedTask, TaskLine};
use taskscan::engine::TaskIndex;
use taskscan::sources::ScopeFilters;
use vaultstore::VaultStore;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskscan")
        .join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Level priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("taskscan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

/// Scope for this invocation: config defaults, with --today forcing the
/// current-period restriction on
fn scope_for(config: &Config, today: bool) -> ScopeFilters {
    let mut scope = config.scope.clone();
    if today {
        scope.current_period_only = true;
    }
    scope
}

fn print_task(task: &TaskLine) {
    println!(
        "{} {} {}",
        format!("[{}]", task.status).yellow(),
        task.text,
        format!("({})", task.location()).dimmed()
    );
}

fn print_ranked(task: &RankedTask) {
    let rank = task
        .rank
        .map(|r| format!("rank {}", r))
        .unwrap_or_else(|| "unranked".to_string());
    println!(
        "{} {} {} {}",
        format!("[{}]", task.task.status).yellow(),
        task.task.text.bold(),
        format!("({})", task.task.location()).dimmed(),
        rank.cyan()
    );
}

async fn run_scan(
    index: &mut TaskIndex,
    scope: &ScopeFilters,
    all: bool,
    page_size: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    index.initialize_scan(scope).await;
    let target = page_size.unwrap_or(index.page_size());

    let mut tasks: Vec<TaskLine> = Vec::new();
    let mut has_more;
    loop {
        let batch = index.fetch_next_batch(target).await?;
        has_more = batch.has_more;
        tasks.extend(batch.tasks);
        if !all || !has_more {
            break;
        }
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        OutputFormat::Text => {
            for task in &tasks {
                print_task(task);
            }
            let trailer = if has_more { ", more available" } else { "" };
            eprintln!("{} {} task(s){}", "✓".green(), tasks.len(), trailer);
        }
    }
    Ok(())
}

async fn run_top(index: &mut TaskIndex, scope: &ScopeFilters) -> Result<()> {
    index.initialize_scan(scope).await;
    let tasks = index.fetch_all().await?;
    let outcome = index.rank(&tasks).await;

    match outcome.top {
        Some(top) => {
            print_ranked(&top);
            let ranked_count = outcome.ranked.iter().filter(|r| r.rank.is_some()).count();
            eprintln!(
                "{} top task out of {} tiered / {} loaded",
                "✓".green(),
                ranked_count,
                outcome.ranked.len()
            );
        }
        None => {
            eprintln!("{} no top task ({} task(s) loaded)", "∅".dimmed(), tasks.len());
        }
    }
    Ok(())
}

async fn run_sources(index: &mut TaskIndex, scope: &ScopeFilters) -> Result<()> {
    index.initialize_scan(scope).await;
    for id in index.documents() {
        println!("{}", id);
    }
    eprintln!("{} {} document(s)", "✓".green(), index.documents().len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(vault) = &cli.vault {
        config.vault.root = vault.clone();
    }

    setup_logging(cli.log_level.as_deref(), config.logging.level.as_deref())?;
    config.validate()?;

    info!(vault = %config.vault.root.display(), "taskscan starting");

    let store = Arc::new(VaultStore::open(&config.vault.root)?);
    let mut index = TaskIndex::new(store, &config);

    match cli.command {
        Command::Scan {
            all,
            page_size,
            today,
            format,
        } => {
            let scope = scope_for(&config, today);
            run_scan(&mut index, &scope, all, page_size, format).await?;
        }
        Command::Top { today } => {
            let scope = scope_for(&config, today);
            run_top(&mut index, &scope).await?;
        }
        Command::Sources { today } => {
            let scope = scope_for(&config, today);
            run_sources(&mut index, &scope).await?;
        }
    }

    Ok(())
}
