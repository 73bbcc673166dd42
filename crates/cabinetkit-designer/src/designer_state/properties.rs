//! Property setters for the current cabinet.
//!
//! Every setter writes the parameter panel first and then applies the
//! value to the current cabinet, so the next placed cabinet picks it up
//! even when nothing is selected.

use std::fmt;

use cabinetkit_core::units::parse_dimension;
use cabinetkit_core::{CabinetColor, CabinetType, Finish, Material, Result};

use super::DesignerState;
use crate::model::clamp_shelf_count;

/// One of the three box dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
    Depth,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Depth => "depth",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl DesignerState {
    /// Resizes the current cabinet. Only the given dimensions change.
    pub fn set_dimensions(
        &mut self,
        width_in: Option<f64>,
        height_in: Option<f64>,
        depth_in: Option<f64>,
    ) -> Result<()> {
        let mut form = self.form.clone();
        form.width_in = width_in.unwrap_or(form.width_in);
        form.height_in = height_in.unwrap_or(form.height_in);
        form.depth_in = depth_in.unwrap_or(form.depth_in);
        form.validate()?;
        self.form = form;

        let change = self
            .engine
            .require_current_mut()?
            .set_dimensions(width_in, height_in, depth_in)?;
        self.engine.queue(change);
        self.is_modified = true;
        Ok(())
    }

    pub fn set_dimension(&mut self, dimension: Dimension, inches: f64) -> Result<()> {
        match dimension {
            Dimension::Width => self.set_dimensions(Some(inches), None, None),
            Dimension::Height => self.set_dimensions(None, Some(inches), None),
            Dimension::Depth => self.set_dimensions(None, None, Some(inches)),
        }
    }

    /// Parses panel text such as `23 1/2` and applies it.
    pub fn set_dimension_text(&mut self, dimension: Dimension, text: &str) -> Result<()> {
        let inches = parse_dimension(dimension.name(), text)?;
        self.set_dimension(dimension, inches)
    }

    pub fn set_color(&mut self, key: &str) -> Result<()> {
        self.form.color = CabinetColor::from_key(key);
        let color = self.form.color;
        let change = self.engine.require_current_mut()?.set_color_value(color);
        self.engine.queue(change);
        self.is_modified = true;
        Ok(())
    }

    pub fn set_material(&mut self, key: &str) -> Result<()> {
        self.form.material = Material::from_key(key);
        let material = self.form.material;
        self.engine.require_current_mut()?.set_material_value(material);
        self.is_modified = true;
        Ok(())
    }

    pub fn set_finish(&mut self, key: &str) -> Result<()> {
        self.form.finish = Finish::from_key(key);
        let finish = self.form.finish;
        self.engine.require_current_mut()?.set_finish_value(finish);
        self.is_modified = true;
        Ok(())
    }

    /// Sets the type used for placement. Existing cabinets keep their
    /// position; the type only matters when a cabinet is placed.
    pub fn set_cabinet_type(&mut self, key: &str) -> Result<()> {
        self.form.cabinet_type = CabinetType::from_key(key);
        let cabinet_type = self.form.cabinet_type;
        self.engine
            .require_current_mut()?
            .set_cabinet_type(cabinet_type);
        self.is_modified = true;
        Ok(())
    }

    pub fn set_shelf_count(&mut self, count: i64) -> Result<()> {
        self.form.shelf_count = clamp_shelf_count(count);
        let change = self.engine.require_current_mut()?.set_shelf_count(count);
        self.engine.queue(change);
        self.is_modified = true;
        Ok(())
    }

    /// Flips the current cabinet between solid and open view.
    pub fn toggle_hollow(&mut self) -> Result<bool> {
        let cabinet = self.engine.require_current_mut()?;
        let hollow = !cabinet.is_hollow();
        let change = cabinet.set_hollow(hollow);
        self.engine.queue(change);
        Ok(hollow)
    }

    /// Opens or closes the current cabinet's door. The swing plays out
    /// over subsequent ticks.
    pub fn toggle_door(&mut self) -> Result<bool> {
        let open = self.engine.require_current_mut()?.toggle_door();
        self.is_modified = true;
        Ok(open)
    }
}
