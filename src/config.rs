//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::task::{StoreOptions, DEFAULT_FILE_NAME};

const APP_DIR_NAME: &str = "task-cli";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backing file; `~/` expands to the home directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default)]
    pub lock: bool,

    #[serde(default)]
    pub backup: bool,
}

impl StoreConfig {
    pub fn options(&self) -> StoreOptions {
        StoreOptions {
            lock: self.lock,
            backup: self.backup,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
}

impl Config {
    /// Load from the user config directory, falling back to defaults when
    /// there is no config file.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Pick the backing file: explicit override, then config, then
    /// `tasks.json` in the working directory.
    pub fn resolve_store_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.store.path.as_deref().map(expand_home))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
    }
}

fn expand_home(s: &str) -> PathBuf {
    if let Some(stripped) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(s)
}
