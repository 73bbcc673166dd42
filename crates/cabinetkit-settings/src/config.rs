//! Configuration and settings management for CabinetKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Cabinet defaults (panel values for a new session)
//! - Cost rates and the active pricing policy
//! - Room defaults (ceiling height, 3D room visibility)
//! - Export naming and snapshot size

use std::path::Path;

use serde::{Deserialize, Serialize};

use cabinetkit_core::{CabinetColor, CabinetType, Finish, Material};
use cabinetkit_designer::model::{
    DEFAULT_DEPTH_IN, DEFAULT_HEIGHT_IN, DEFAULT_SHELF_COUNT, DEFAULT_WIDTH_IN, MAX_SHELF_COUNT,
};
use cabinetkit_designer::room::DEFAULT_CEILING_HEIGHT_FT;
use cabinetkit_designer::snapshot::DEFAULT_FILE_STEM;
use cabinetkit_designer::{
    CabinetParams, CostPolicy, CostRates, RoomContext, SessionSettings, SnapshotOptions,
};

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// Largest snapshot edge in pixels
pub const MAX_SNAPSHOT_EDGE: u32 = 8192;

/// Defaults for new cabinets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinetDefaults {
    pub width_in: f64,
    pub height_in: f64,
    pub depth_in: f64,
    pub color: CabinetColor,
    pub material: Material,
    pub finish: Finish,
    pub shelf_count: u32,
    #[serde(rename = "type")]
    pub cabinet_type: CabinetType,
}

impl Default for CabinetDefaults {
    fn default() -> Self {
        Self {
            width_in: DEFAULT_WIDTH_IN,
            height_in: DEFAULT_HEIGHT_IN,
            depth_in: DEFAULT_DEPTH_IN,
            color: CabinetColor::default(),
            material: Material::default(),
            finish: Finish::default(),
            shelf_count: DEFAULT_SHELF_COUNT,
            cabinet_type: CabinetType::default(),
        }
    }
}

impl CabinetDefaults {
    pub fn to_params(&self) -> CabinetParams {
        CabinetParams {
            width_in: self.width_in,
            height_in: self.height_in,
            depth_in: self.depth_in,
            cabinet_type: self.cabinet_type,
            color: self.color,
            material: self.material,
            finish: self.finish,
            shelf_count: self.shelf_count,
        }
    }
}

/// Pricing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSettings {
    pub policy: CostPolicy,
    /// Aluminum frame price per square foot
    pub aluminum_per_sq_ft: f64,
    /// Price per shelf
    pub shelf_each: f64,
    /// Volumetric base price per cubic foot
    pub volumetric_per_cu_ft: f64,
}

impl Default for CostSettings {
    fn default() -> Self {
        let rates = CostRates::default();
        Self {
            policy: CostPolicy::default(),
            aluminum_per_sq_ft: rates.aluminum_per_sq_ft,
            shelf_each: rates.shelf_each,
            volumetric_per_cu_ft: rates.volumetric_per_cu_ft,
        }
    }
}

impl CostSettings {
    pub fn rates(&self) -> CostRates {
        CostRates {
            aluminum_per_sq_ft: self.aluminum_per_sq_ft,
            shelf_each: self.shelf_each,
            volumetric_per_cu_ft: self.volumetric_per_cu_ft,
        }
    }
}

/// Room defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomSettings {
    pub ceiling_height_ft: f64,
    pub show_3d_room: bool,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            ceiling_height_ft: DEFAULT_CEILING_HEIGHT_FT,
            show_3d_room: false,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Stem of generated file names, followed by a millisecond timestamp
    pub file_stem: String,
    pub snapshot_width: u32,
    pub snapshot_height: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        let snapshot = SnapshotOptions::default();
        Self {
            file_stem: DEFAULT_FILE_STEM.to_string(),
            snapshot_width: snapshot.width,
            snapshot_height: snapshot.height,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub cabinet: CabinetDefaults,
    pub cost: CostSettings,
    pub room: RoomSettings,
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("(none)").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML, by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML, by extension)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        std::fs::write(path, content)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let cabinet = &self.cabinet;
        for (key, value) in [
            ("cabinet.width_in", cabinet.width_in),
            ("cabinet.height_in", cabinet.height_in),
            ("cabinet.depth_in", cabinet.depth_in),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::out_of_range(key, value));
            }
        }
        if cabinet.shelf_count > MAX_SHELF_COUNT {
            return Err(ConfigError::out_of_range(
                "cabinet.shelf_count",
                cabinet.shelf_count,
            ));
        }

        let cost = &self.cost;
        for (key, value) in [
            ("cost.aluminum_per_sq_ft", cost.aluminum_per_sq_ft),
            ("cost.shelf_each", cost.shelf_each),
            ("cost.volumetric_per_cu_ft", cost.volumetric_per_cu_ft),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::out_of_range(key, value));
            }
        }

        if !self.room.ceiling_height_ft.is_finite() || self.room.ceiling_height_ft <= 0.0 {
            return Err(ConfigError::out_of_range(
                "room.ceiling_height_ft",
                self.room.ceiling_height_ft,
            ));
        }

        let export = &self.export;
        if export.file_stem.trim().is_empty() {
            return Err(ConfigError::out_of_range("export.file_stem", "\"\""));
        }
        for (key, value) in [
            ("export.snapshot_width", export.snapshot_width),
            ("export.snapshot_height", export.snapshot_height),
        ] {
            if value == 0 || value > MAX_SNAPSHOT_EDGE {
                return Err(ConfigError::out_of_range(key, value));
            }
        }

        Ok(())
    }

    /// Session preferences derived from this config.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            cabinet_defaults: self.cabinet.to_params(),
            cost_policy: self.cost.policy,
            cost_rates: self.cost.rates(),
            snapshot: SnapshotOptions {
                width: self.export.snapshot_width,
                height: self.export.snapshot_height,
                ..Default::default()
            },
            file_stem: self.export.file_stem.clone(),
        }
    }

    /// Room context derived from this config.
    pub fn room_context(&self) -> ConfigResult<RoomContext> {
        RoomContext::with_ceiling(self.room.ceiling_height_ft, self.room.show_3d_room)
            .map_err(|_| {
                ConfigError::out_of_range("room.ceiling_height_ft", self.room.ceiling_height_ft)
            })
    }
}
