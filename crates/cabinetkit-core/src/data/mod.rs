//! Data models for CabinetKit
//!
//! Spatial primitives shared by the model, placement and serialization
//! layers, plus the catalog lookup tables.

pub mod catalog;

pub use catalog::{CabinetColor, CabinetType, Finish, Material};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in scene space (units of one foot, Y up)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate (vertical)
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Point3 {
    /// Origin
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components as an `[x, y, z]` array
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Build a point from an `[x, y, z]` array
    pub fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Euler rotation in radians, applied in XYZ order
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Euler {
    /// Rotation about X
    pub x: f64,
    /// Rotation about Y
    pub y: f64,
    /// Rotation about Z
    pub z: f64,
}

impl Euler {
    /// Create a new rotation
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components as an `[x, y, z]` array
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Build a rotation from an `[x, y, z]` array
    pub fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}
