//! Cabinet catalog lookup tables
//!
//! Fixed tables for the color palette, carcass material, surface finish and
//! cabinet type. Every table has a defined default entry: lookups with an
//! unknown key fall back to it instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cabinet color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CabinetColor {
    /// Brushed gray (default)
    #[default]
    Gray,
    /// Off-white
    White,
    /// Near-black
    Black,
    /// Navy
    #[serde(rename = "Dark Blue")]
    DarkBlue,
}

impl CabinetColor {
    /// All palette entries in display order
    pub const ALL: [CabinetColor; 4] = [
        CabinetColor::Gray,
        CabinetColor::White,
        CabinetColor::Black,
        CabinetColor::DarkBlue,
    ];

    /// Palette key as shown in selectors and stored in design files
    pub fn key(&self) -> &'static str {
        match self {
            Self::Gray => "Gray",
            Self::White => "White",
            Self::Black => "Black",
            Self::DarkBlue => "Dark Blue",
        }
    }

    /// Look up a palette key exactly
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Look up a palette key, falling back to the default color
    pub fn from_key(key: &str) -> Self {
        Self::lookup(key).unwrap_or_else(|| {
            tracing::warn!("Unknown cabinet color '{}', using {}", key, Self::default());
            Self::default()
        })
    }

    /// Body, wireframe and door color
    pub fn body_hex(&self) -> u32 {
        match self {
            Self::Gray => 0x9CA3AF,
            Self::White => 0xF5F5F4,
            Self::Black => 0x1C1C1C,
            Self::DarkBlue => 0x1E3A5F,
        }
    }

    /// Shelf tint, a slightly darker shade of the body color
    pub fn shelf_hex(&self) -> u32 {
        match self {
            Self::Gray => 0x6B7280,
            Self::White => 0xD6D3D1,
            Self::Black => 0x111111,
            Self::DarkBlue => 0x1B2E4B,
        }
    }

    /// Body color as RGB components
    pub fn body_rgb(&self) -> (u8, u8, u8) {
        hex_to_rgb(self.body_hex())
    }

    /// Shelf tint as RGB components
    pub fn shelf_rgb(&self) -> (u8, u8, u8) {
        hex_to_rgb(self.shelf_hex())
    }
}

impl fmt::Display for CabinetColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Split a 0xRRGGBB value into components
pub fn hex_to_rgb(hex: u32) -> (u8, u8, u8) {
    (
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}

/// Carcass material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Material {
    /// Plywood, the reference material (default)
    #[default]
    Plywood,
    /// Medium-density fibreboard
    Mdf,
    /// Solid hardwood
    SolidWood,
}

impl Material {
    /// All materials in display order
    pub const ALL: [Material; 3] = [Material::Plywood, Material::Mdf, Material::SolidWood];

    /// Selector key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Plywood => "plywood",
            Self::Mdf => "mdf",
            Self::SolidWood => "solid-wood",
        }
    }

    /// Look up a material key exactly
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Look up a material key, falling back to the default material
    pub fn from_key(key: &str) -> Self {
        Self::lookup(key).unwrap_or_else(|| {
            tracing::warn!("Unknown material '{}', using {}", key, Self::default());
            Self::default()
        })
    }

    /// Price multiplier relative to plywood
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            Self::Plywood => 1.0,
            Self::Mdf => 0.6,
            Self::SolidWood => 2.5,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plywood => write!(f, "Plywood"),
            Self::Mdf => write!(f, "MDF"),
            Self::SolidWood => write!(f, "Solid Wood"),
        }
    }
}

/// Multiplier for a raw material key; unknown keys price as 1.0
pub fn material_multiplier_for_key(key: &str) -> f64 {
    Material::lookup(key)
        .map(|m| m.cost_multiplier())
        .unwrap_or(1.0)
}

/// Surface finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finish {
    /// Raw material (default)
    #[default]
    None,
    /// Painted
    Painted,
    /// Stained
    Stained,
}

impl Finish {
    /// All finishes in display order
    pub const ALL: [Finish; 3] = [Finish::None, Finish::Painted, Finish::Stained];

    /// Selector key
    pub fn key(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Painted => "painted",
            Self::Stained => "stained",
        }
    }

    /// Look up a finish key exactly
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Look up a finish key, falling back to no finish
    pub fn from_key(key: &str) -> Self {
        Self::lookup(key).unwrap_or_else(|| {
            tracing::warn!("Unknown finish '{}', using none", key);
            Self::default()
        })
    }

    /// Flat add-on price in dollars
    pub fn flat_cost(&self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Painted => 50.0,
            Self::Stained => 75.0,
        }
    }
}

impl fmt::Display for Finish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "No Finish"),
            Self::Painted => write!(f, "Painted"),
            Self::Stained => write!(f, "Stained"),
        }
    }
}

/// Flat add-on for a raw finish key; unknown keys cost nothing
pub fn finish_cost_for_key(key: &str) -> f64 {
    Finish::lookup(key).map(|f| f.flat_cost()).unwrap_or(0.0)
}

/// Cabinet type. Only affects vertical placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinetType {
    /// Floor-standing base cabinet (default)
    #[default]
    Base,
    /// Wall-hung cabinet above counter height
    Wall,
    /// Floor-standing full-height cabinet
    Tall,
}

impl CabinetType {
    /// All types in display order
    pub const ALL: [CabinetType; 3] = [CabinetType::Base, CabinetType::Wall, CabinetType::Tall];

    /// Selector key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Wall => "wall",
            Self::Tall => "tall",
        }
    }

    /// Look up a type key exactly
    pub fn lookup(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    /// Look up a type key, falling back to a base cabinet
    pub fn from_key(key: &str) -> Self {
        Self::lookup(key).unwrap_or_else(|| {
            tracing::warn!("Unknown cabinet type '{}', using base", key);
            Self::default()
        })
    }

    /// Whether the cabinet hangs on the wall instead of standing on the floor
    pub fn is_wall_mounted(&self) -> bool {
        matches!(self, Self::Wall)
    }
}

impl fmt::Display for CabinetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "Base"),
            Self::Wall => write!(f, "Wall"),
            Self::Tall => write!(f, "Tall"),
        }
    }
}
