//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    AUTOSAVE_FILENAME, CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_CATALOG_FILENAME,
};

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// Step catalog; `steps.yaml` in the working directory when unset
    pub catalog: Option<PathBuf>,
    /// Directory for saved sessions, autosave and credential inputs;
    /// the working directory when unset
    pub session_dir: Option<PathBuf>,
}

/// Autosave settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Write a snapshot every second while the TUI runs
    pub enabled: bool,
    /// File name inside the session directory
    pub file_name: String,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file_name: AUTOSAVE_FILENAME.to_string(),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    pub theme_mode: ThemeMode,
    /// Machine type/model values offered by the identifier form
    pub mtm_options: Vec<String>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/RackChecklist/config.toml`
/// - macOS: `~/Library/Application Support/RackChecklist/config.toml`
/// - Windows: `%APPDATA%\RackChecklist\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
    /// Autosave settings
    pub autosave: AutosaveConfig,
    /// UI preferences
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// `RACK_CHECKLIST_CONFIG_DIR` takes precedence when set.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit file, creating its directory.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - the autosave file name is a bare file name
    /// - the session directory, if set, is a directory
    pub fn validate(&self) -> Result<()> {
        let file_name = &self.autosave.file_name;
        if file_name.is_empty() || Path::new(file_name).file_name() != Some(OsStr::new(file_name)) {
            anyhow::bail!("autosave.file_name must be a plain file name, got '{file_name}'");
        }

        if let Some(dir) = &self.paths.session_dir {
            if dir.exists() && !dir.is_dir() {
                anyhow::bail!("paths.session_dir is not a directory: {}", dir.display());
            }
        }

        Ok(())
    }

    /// Catalog to load: the explicit override, then `paths.catalog`, then
    /// `steps.yaml` in the working directory.
    #[must_use]
    pub fn resolve_catalog(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.paths.catalog.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILENAME))
    }

    /// Directory for session files and credential inputs.
    #[must_use]
    pub fn session_dir(&self) -> PathBuf {
        self.paths
            .session_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Full path of the autosave file.
    #[must_use]
    pub fn autosave_path(&self) -> PathBuf {
        self.session_dir().join(&self.autosave.file_name)
    }
}
