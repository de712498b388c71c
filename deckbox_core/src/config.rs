//! Configuration file support for Deckbox.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/deckbox/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub shell: ShellConfig,
}

/// Data locations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Card catalog directory, `<data_dir>/catalog` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,

    /// Saved decks directory, `<data_dir>/decks` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decks_dir: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_dir: None,
            decks_dir: None,
        }
    }
}

impl DataConfig {
    pub fn catalog_dir(&self) -> PathBuf {
        self.catalog_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("catalog"))
    }

    pub fn decks_dir(&self) -> PathBuf {
        self.decks_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("decks"))
    }
}

/// Interactive shell behaviour
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Maximum number of search results printed
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Load every saved deck at startup
    #[serde(default = "default_autoload_decks")]
    pub autoload_decks: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            autoload_decks: default_autoload_decks(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("deckbox")
}

fn default_search_limit() -> usize {
    50
}

fn default_autoload_decks() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("deckbox").join("config.toml"))
    }

    /// Reject settings the shell cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.shell.search_limit == 0 {
            return Err(Error::Config("shell.search_limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
