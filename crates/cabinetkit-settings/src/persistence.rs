//! Settings Persistence
//!
//! Handles loading and saving the configuration file in the platform
//! config directory (`<config_dir>/cabinetkit/config.toml`).

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Application directory name under the platform config directory
pub const APP_DIR_NAME: &str = "cabinetkit";
/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config file location for this platform.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
    })?;
    Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Settings persistence layer
#[derive(Debug, Clone)]
pub struct SettingsPersistence {
    config: Config,
    path: PathBuf,
}

impl SettingsPersistence {
    /// Create persistence layer with default config bound to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::default(),
            path: path.into(),
        }
    }

    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist yet. A file that exists but fails to parse or
    /// validate is an error.
    pub fn load_or_default(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::new(path));
        }
        let config = Config::load_from_file(&path)?;
        Ok(Self { config, path })
    }

    /// Load from the platform default location
    pub fn open_default() -> SettingsResult<Self> {
        Self::load_or_default(default_config_path()?)
    }

    /// Save settings, creating the parent directory when needed
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        self.config.save_to_file(&self.path)
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
