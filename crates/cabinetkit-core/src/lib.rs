//! # CabinetKit Core
//!
//! Core types and utilities for CabinetKit.
//! Provides the catalog lookup tables (palette, material, finish, cabinet
//! type), spatial primitives, unit conversions and the error types shared by
//! every other crate in the workspace.

pub mod data;
pub mod error;
pub mod units;

pub use data::{CabinetColor, CabinetType, Euler, Finish, Material, Point3};

pub use error::{CabinetError, DesignError, Error, PlacementError, Result, RoomError};
