//! Design file serialization.
//!
//! A design is a JSON document with camelCase keys:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "roomPhoto": null,
//!   "ceilingHeight": 8,
//!   "cabinets": [
//!     {
//!       "position": [0, 1.5, 0], "rotation": [0, 0, 0],
//!       "widthIn": 24, "heightIn": 36, "depthIn": 12,
//!       "color": "Gray", "shelfCount": 2, "type": "base"
//!     }
//!   ]
//! }
//! ```
//!
//! Loading is staged: the whole document is parsed and every cabinet is
//! built before anything is handed back, so a bad document never leaves a
//! half-loaded design behind.
//!
//! `roomPhoto` has three states: a string replaces the photo, `null` clears
//! it, and a missing key leaves the room photo alone.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use cabinetkit_core::units::validate_dimension;
use cabinetkit_core::{
    CabinetColor, CabinetType, DesignError, Euler, Finish, Material, Point3, RoomError,
};

use crate::model::{check_shelf_count, Cabinet, CabinetParams};
use crate::placement::PlacementEngine;
use crate::room::{RoomContext, RoomPhoto};

/// Design file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// Keys every cabinet entry must carry
const REQUIRED_CABINET_FIELDS: [&str; 8] = [
    "position",
    "rotation",
    "widthIn",
    "heightIn",
    "depthIn",
    "color",
    "shelfCount",
    "type",
];

/// Complete design file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignFile {
    pub version: String,
    /// `None` when the key is absent, `Some(None)` for an explicit null
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub room_photo: Option<Option<String>>,
    #[serde(default)]
    pub ceiling_height: Option<f64>,
    #[serde(default)]
    pub cabinets: Vec<CabinetData>,
}

/// Serialized cabinet entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinetData {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub width_in: f64,
    pub height_in: f64,
    pub depth_in: f64,
    pub color: String,
    pub shelf_count: i64,
    #[serde(rename = "type")]
    pub cabinet_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_open: Option<bool>,
}

impl CabinetData {
    /// Captures a cabinet's persistent state. The animated door angle and
    /// the hollow view are display state and are not written.
    pub fn from_cabinet(cabinet: &Cabinet) -> Self {
        Self {
            position: cabinet.position().to_array(),
            rotation: cabinet.rotation().to_array(),
            width_in: cabinet.width_in(),
            height_in: cabinet.height_in(),
            depth_in: cabinet.depth_in(),
            color: cabinet.color().key().to_string(),
            shelf_count: cabinet.shelf_count() as i64,
            cabinet_type: cabinet.cabinet_type().key().to_string(),
            material: Some(cabinet.material().key().to_string()),
            finish: Some(cabinet.finish().key().to_string()),
            door_open: Some(cabinet.is_door_open()),
        }
    }

    /// Builds a cabinet from this entry. Unknown appearance keys fall back
    /// to their defaults; bad dimensions reject the entry.
    pub fn to_cabinet(&self, index: usize, id: u64) -> Result<Cabinet, DesignError> {
        let invalid = |source| DesignError::InvalidCabinet { index, source };

        let params = CabinetParams {
            width_in: validate_dimension("width", self.width_in).map_err(invalid)?,
            height_in: validate_dimension("height", self.height_in).map_err(invalid)?,
            depth_in: validate_dimension("depth", self.depth_in).map_err(invalid)?,
            cabinet_type: CabinetType::from_key(&self.cabinet_type),
            color: CabinetColor::from_key(&self.color),
            material: self
                .material
                .as_deref()
                .map(Material::from_key)
                .unwrap_or_default(),
            finish: self
                .finish
                .as_deref()
                .map(Finish::from_key)
                .unwrap_or_default(),
            shelf_count: check_shelf_count(self.shelf_count).map_err(invalid)?,
        };

        let mut cabinet = Cabinet::create(id, &params).map_err(invalid)?;
        cabinet.set_position(Point3::from_array(self.position));
        cabinet.set_rotation(Euler::from_array(self.rotation));
        cabinet.rest_door(self.door_open.unwrap_or(false));
        Ok(cabinet)
    }
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// What a load does to the room photo.
#[derive(Debug, Clone, Default)]
pub enum PhotoUpdate {
    #[default]
    Keep,
    Clear,
    Replace(RoomPhoto),
}

/// A design that parsed and validated completely, ready to swap in.
#[derive(Debug, Clone)]
pub struct LoadedDesign {
    pub cabinets: Vec<Cabinet>,
    pub room_photo: PhotoUpdate,
    pub ceiling_height_ft: Option<f64>,
}

impl DesignFile {
    /// Create an empty design document
    pub fn new() -> Self {
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            room_photo: None,
            ceiling_height: None,
            cabinets: Vec::new(),
        }
    }

    /// Captures the collection and room context.
    pub fn capture(engine: &PlacementEngine, room: &RoomContext) -> Self {
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            room_photo: Some(room.photo().map(|p| p.payload().to_string())),
            ceiling_height: Some(room.ceiling_height_ft()),
            cabinets: engine.iter().map(CabinetData::from_cabinet).collect(),
        }
    }

    /// Parses a document, reporting missing cabinet fields by name.
    pub fn from_json(json: &str) -> Result<Self, DesignError> {
        let value: Value = serde_json::from_str(json)?;
        check_required_fields(&value)?;
        let design: DesignFile = serde_json::from_value(value)?;
        design.check_version()?;
        Ok(design)
    }

    pub fn to_json(&self) -> Result<String, DesignError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_version(&self) -> Result<(), DesignError> {
        let major = self.version.split('.').next().unwrap_or_default();
        if major != "1" {
            return Err(DesignError::UnsupportedVersion {
                version: self.version.clone(),
            });
        }
        Ok(())
    }

    /// Builds everything the document describes without touching any live
    /// state. Cabinets get ids 1..=n in document order.
    pub fn restore(&self) -> Result<LoadedDesign, DesignError> {
        let cabinets = self
            .cabinets
            .iter()
            .enumerate()
            .map(|(index, data)| data.to_cabinet(index, index as u64 + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let room_photo = match &self.room_photo {
            None => PhotoUpdate::Keep,
            Some(None) => PhotoUpdate::Clear,
            Some(Some(payload)) if payload.is_empty() => PhotoUpdate::Clear,
            Some(Some(payload)) => PhotoUpdate::Replace(RoomPhoto::decode(payload.as_str())?),
        };

        let ceiling_height_ft = match self.ceiling_height {
            Some(h) if !h.is_finite() || h <= 0.0 => {
                return Err(RoomError::InvalidCeilingHeight { value: h }.into())
            }
            other => other,
        };

        Ok(LoadedDesign {
            cabinets,
            room_photo,
            ceiling_height_ft,
        })
    }

    /// Save design to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), DesignError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        tracing::info!(
            "Saved design with {} cabinets to {}",
            self.cabinets.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Load design from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, DesignError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}

impl Default for DesignFile {
    fn default() -> Self {
        Self::new()
    }
}

fn check_required_fields(value: &Value) -> Result<(), DesignError> {
    let Some(root) = value.as_object() else {
        return Err(DesignError::Malformed {
            reason: "design document must be a JSON object".to_string(),
        });
    };
    let Some(cabinets) = root.get("cabinets") else {
        return Ok(());
    };
    let Some(entries) = cabinets.as_array() else {
        return Err(DesignError::Malformed {
            reason: "'cabinets' must be an array".to_string(),
        });
    };

    for (index, entry) in entries.iter().enumerate() {
        let Some(fields) = entry.as_object() else {
            return Err(DesignError::Malformed {
                reason: format!("cabinet #{} is not an object", index),
            });
        };
        if let Some(field) = REQUIRED_CABINET_FIELDS
            .into_iter()
            .find(|f| fields.get(*f).map_or(true, Value::is_null))
        {
            return Err(DesignError::MissingField { index, field });
        }
    }
    Ok(())
}

/// Serializes the collection and room context into a design document.
pub fn save(engine: &PlacementEngine, room: &RoomContext) -> DesignFile {
    DesignFile::capture(engine, room)
}

/// Parses and fully builds a design document.
pub fn load(json: &str) -> Result<LoadedDesign, DesignError> {
    DesignFile::from_json(json)?.restore()
}
