//! Cost estimation.
//!
//! Two interchangeable pricing policies:
//!
//! - **Aluminum frame**: surface area and shelves, summed over every cabinet
//!   in the design.
//! - **Volumetric**: interior volume scaled by a material multiplier, plus a
//!   flat finish charge, for the current cabinet only.
//!
//! Amounts are carried unrounded; rounding to cents happens at display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use cabinetkit_core::units::{format_currency, inches_to_feet};

use crate::model::Cabinet;

/// Aluminum frame price per square foot of surface
pub const ALUMINUM_COST_PER_SQ_FT: f64 = 12.0;
/// Price per shelf
pub const SHELF_COST: f64 = 15.0;
/// Base price per cubic foot of volume
pub const VOLUMETRIC_COST_PER_CU_FT: f64 = 15.0;

/// Which pricing policy to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostPolicy {
    #[default]
    AluminumFrame,
    Volumetric,
}

impl CostPolicy {
    pub fn key(&self) -> &'static str {
        match self {
            Self::AluminumFrame => "aluminum-frame",
            Self::Volumetric => "volumetric",
        }
    }
}

impl fmt::Display for CostPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CostPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aluminum-frame" | "aluminum" | "frame" => Ok(Self::AluminumFrame),
            "volumetric" | "volume" => Ok(Self::Volumetric),
            other => Err(format!("Unknown cost policy: {}", other)),
        }
    }
}

/// Unit prices used by both policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    pub aluminum_per_sq_ft: f64,
    pub shelf_each: f64,
    pub volumetric_per_cu_ft: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            aluminum_per_sq_ft: ALUMINUM_COST_PER_SQ_FT,
            shelf_each: SHELF_COST,
            volumetric_per_cu_ft: VOLUMETRIC_COST_PER_CU_FT,
        }
    }
}

/// An itemized estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostBreakdown {
    pub material: f64,
    pub shelves: f64,
    pub finish: f64,
    pub total: f64,
}

impl CostBreakdown {
    /// Display lines, each amount rounded to cents.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Material Cost: {}", format_currency(self.material)),
            format!("Shelf Cost: {}", format_currency(self.shelves)),
            format!("Finish Cost: {}", format_currency(self.finish)),
            format!("Total Cost: {}", format_currency(self.total)),
        ]
    }
}

impl std::ops::Add for CostBreakdown {
    type Output = CostBreakdown;

    fn add(self, rhs: Self) -> Self::Output {
        CostBreakdown {
            material: self.material + rhs.material,
            shelves: self.shelves + rhs.shelves,
            finish: self.finish + rhs.finish,
            total: self.total + rhs.total,
        }
    }
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Total surface area of a box, in square feet.
pub fn surface_area_sq_ft(width_in: f64, height_in: f64, depth_in: f64) -> f64 {
    let (w, h, d) = (
        inches_to_feet(width_in),
        inches_to_feet(height_in),
        inches_to_feet(depth_in),
    );
    2.0 * (w * h + w * d + h * d)
}

/// Volume of a box, in cubic feet.
pub fn volume_cu_ft(width_in: f64, height_in: f64, depth_in: f64) -> f64 {
    inches_to_feet(width_in) * inches_to_feet(height_in) * inches_to_feet(depth_in)
}

/// Aluminum frame estimate for a single cabinet.
pub fn aluminum_frame_cost(cabinet: &Cabinet, rates: &CostRates) -> CostBreakdown {
    let material =
        surface_area_sq_ft(cabinet.width_in(), cabinet.height_in(), cabinet.depth_in())
            * rates.aluminum_per_sq_ft;
    let shelves = cabinet.shelf_count() as f64 * rates.shelf_each;
    CostBreakdown {
        material,
        shelves,
        finish: 0.0,
        total: material + shelves,
    }
}

/// Aluminum frame estimate summed over a collection.
pub fn aluminum_frame_total<'a, I>(cabinets: I, rates: &CostRates) -> CostBreakdown
where
    I: IntoIterator<Item = &'a Cabinet>,
{
    cabinets
        .into_iter()
        .map(|c| aluminum_frame_cost(c, rates))
        .fold(CostBreakdown::default(), |acc, c| acc + c)
}

/// Volumetric estimate for a single cabinet.
pub fn volumetric_cost(cabinet: &Cabinet, rates: &CostRates) -> CostBreakdown {
    volumetric(
        cabinet.width_in(),
        cabinet.height_in(),
        cabinet.depth_in(),
        cabinet.material().cost_multiplier(),
        cabinet.finish().flat_cost(),
        rates,
    )
}

fn volumetric(
    width_in: f64,
    height_in: f64,
    depth_in: f64,
    multiplier: f64,
    finish: f64,
    rates: &CostRates,
) -> CostBreakdown {
    let material = volume_cu_ft(width_in, height_in, depth_in) * rates.volumetric_per_cu_ft * multiplier;
    CostBreakdown {
        material,
        shelves: 0.0,
        finish,
        total: material + finish,
    }
}

/// Applies a policy: the aluminum frame policy prices the whole collection,
/// the volumetric policy prices `current` alone (nothing when unset).
pub fn estimate(
    policy: CostPolicy,
    cabinets: &[Cabinet],
    current: Option<&Cabinet>,
    rates: &CostRates,
) -> CostBreakdown {
    match policy {
        CostPolicy::AluminumFrame => aluminum_frame_total(cabinets, rates),
        CostPolicy::Volumetric => current
            .map(|c| volumetric_cost(c, rates))
            .unwrap_or_default(),
    }
}
