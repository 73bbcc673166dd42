//! CabinetKit Settings Crate
//!
//! Handles application configuration and settings persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{CabinetDefaults, Config, CostSettings, ExportSettings, RoomSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use persistence::{default_config_path, SettingsPersistence};
