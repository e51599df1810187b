//! Configuration handling for todolist
//!
//! Configuration is read from `config.toml` in the user's config directory
//! (for example `~/.config/todolist/config.toml` on Linux), or from an
//! explicit path passed with `--config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Title for session lists that are not seeded from a document
    pub default_title: String,

    /// Output format used when `--format` is not given
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: "Todo".to_string(),
            default_format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Returns the user config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "todolist", "todolist").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads configuration from the user config directory, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = match Self::config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return Ok(Self::default()),
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::read(&config_path)
    }

    /// Loads configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).context("Failed to parse config")
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
