//! Taskscan configuration types and loading

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use vaultstore::OriginSpec;

use crate::domain::RankTier;
use crate::filter::StatusFilterSet;
use crate::sources::ScopeFilters;

/// Main taskscan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault location
    pub vault: VaultConfig,

    /// Ordered document origins
    pub sources: Vec<OriginSpec>,

    /// Scope restriction defaults
    pub scope: ScopeFilters,

    /// Status symbol -> included flag
    pub statuses: StatusFilterSet,

    /// Ranking tiers, ascending priority = higher precedence
    pub tiers: Vec<RankTier>,

    /// Scanner settings
    pub scan: ScanConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault: VaultConfig::default(),
            sources: default_sources(),
            scope: ScopeFilters::default(),
            statuses: default_statuses(),
            tiers: default_tiers(),
            scan: ScanConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if !self.vault.root.is_dir() {
            return Err(eyre::eyre!(
                "Vault root does not exist: {}",
                self.vault.root.display()
            ));
        }
        if self.scan.page_size == 0 {
            return Err(eyre::eyre!("scan.page-size must be at least 1"));
        }
        let mut symbols: Vec<char> = self.tiers.iter().map(|t| t.symbol).collect();
        symbols.sort_unstable();
        symbols.dedup();
        if symbols.len() != self.tiers.len() {
            return Err(eyre::eyre!("tier symbols must be unique"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain: explicit path, project-local
    /// `.taskscan.yml`, user config, defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".taskscan.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("taskscan").join("taskscan.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Vault location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Vault root directory
    pub root: PathBuf,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// Scanner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Batch target per fetch
    #[serde(rename = "page-size")]
    pub page_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { page_size: 50 }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Subscriber level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: Option<String>,
}

fn default_sources() -> Vec<OriginSpec> {
    vec![OriginSpec::Subtree { path: String::new() }]
}

fn default_statuses() -> StatusFilterSet {
    [
        (' ', true),
        ('/', true),
        ('!', true),
        ('+', true),
        ('?', true),
        ('x', false),
        ('-', false),
    ]
    .into_iter()
    .collect()
}

fn default_tiers() -> Vec<RankTier> {
    vec![RankTier::new('/', 1), RankTier::new('!', 2), RankTier::new('+', 3)]
}
