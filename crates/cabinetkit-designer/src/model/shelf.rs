//! Shelf layout.
//!
//! Shelves are derived entirely from the cabinet's height and the shelf
//! count, so they are recomputed from scratch whenever either changes.

use serde::{Deserialize, Serialize};

use cabinetkit_core::CabinetError;

/// Fraction of the cabinet's width and depth a shelf spans
pub const SHELF_SPAN_RATIO: f64 = 0.95;

/// Shelf panel thickness in scene units
pub const SHELF_THICKNESS: f64 = 0.05;

/// Most shelves a single cabinet can hold
pub const MAX_SHELF_COUNT: u32 = 100;

/// A single horizontal shelf, positioned relative to the cabinet center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    /// Vertical center of the shelf relative to the cabinet center
    pub y: f64,
    pub width: f64,
    pub depth: f64,
    pub thickness: f64,
}

/// Computes evenly spaced shelves for a cabinet.
///
/// With `count` shelves the interior height is split into `count + 1` equal
/// gaps, so no shelf ever touches the top or bottom face.
pub fn layout_shelves(width_units: f64, height_units: f64, depth_units: f64, count: u32) -> Vec<Shelf> {
    if count == 0 {
        return Vec::new();
    }

    let spacing = height_units / (count as f64 + 1.0);
    (0..count)
        .map(|i| Shelf {
            y: -height_units / 2.0 + spacing * (i as f64 + 1.0),
            width: width_units * SHELF_SPAN_RATIO,
            depth: depth_units * SHELF_SPAN_RATIO,
            thickness: SHELF_THICKNESS,
        })
        .collect()
}

/// Clamps a requested shelf count from UI input to `0..=MAX_SHELF_COUNT`.
pub fn clamp_shelf_count(requested: i64) -> u32 {
    requested.clamp(0, MAX_SHELF_COUNT as i64) as u32
}

/// Accepts a stored shelf count. Negative counts clamp to 0; counts above
/// [`MAX_SHELF_COUNT`] are rejected.
pub fn check_shelf_count(requested: i64) -> Result<u32, CabinetError> {
    if requested > MAX_SHELF_COUNT as i64 {
        return Err(CabinetError::TooManyShelves {
            count: requested,
            max: MAX_SHELF_COUNT,
        });
    }
    Ok(clamp_shelf_count(requested))
}
