//! Designer session state.
//!
//! Ties the placement engine, room context and parameter panel together
//! the way an interactive front end drives them: edits go to the current
//! cabinet, clicks place new cabinets from the panel values, and scene
//! updates are flushed once per event or tick.
//!
//! - `properties`: setters for the current cabinet
//! - `file_io`: save, load, new design and snapshot export

mod file_io;
mod properties;

pub use properties::Dimension;

use std::path::PathBuf;

use cabinetkit_core::{PlacementError, Point3, Result};

use crate::cost::{estimate, CostBreakdown, CostPolicy, CostRates};
use crate::model::{Cabinet, CabinetParams};
use crate::placement::PlacementEngine;
use crate::renderer::{SceneChange, SceneRenderer};
use crate::room::RoomContext;
use crate::snapshot::{SnapshotOptions, DEFAULT_FILE_STEM};

/// Session-wide preferences
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSettings {
    /// Panel values a new session starts with
    pub cabinet_defaults: CabinetParams,
    pub cost_policy: CostPolicy,
    pub cost_rates: CostRates,
    pub snapshot: SnapshotOptions,
    /// Stem of generated design and snapshot file names
    pub file_stem: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cabinet_defaults: CabinetParams::default(),
            cost_policy: CostPolicy::default(),
            cost_rates: CostRates::default(),
            snapshot: SnapshotOptions::default(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }
}

/// Designer state for UI integration
#[derive(Clone, Debug)]
pub struct DesignerState {
    pub(crate) engine: PlacementEngine,
    pub(crate) room: RoomContext,
    /// Values currently in the parameter panel; new cabinets are built from these
    pub(crate) form: CabinetParams,
    pub settings: SessionSettings,
    pub placement_mode: bool,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignerState {
    /// Creates a session with default settings and one default cabinet.
    pub fn new() -> Self {
        Self::with_settings(SessionSettings::default(), RoomContext::default())
    }

    /// Creates a session holding one cabinet built from the settings'
    /// defaults, at the origin and current.
    pub fn with_settings(mut settings: SessionSettings, room: RoomContext) -> Self {
        if let Err(e) = settings.cabinet_defaults.validate() {
            tracing::warn!("Ignoring configured cabinet defaults: {}", e);
            settings.cabinet_defaults = CabinetParams::default();
        }

        let mut state = Self {
            engine: PlacementEngine::new(),
            room,
            form: settings.cabinet_defaults.clone(),
            settings,
            placement_mode: false,
            current_file_path: None,
            is_modified: false,
        };
        state.add_initial_cabinet();
        state
    }

    fn add_initial_cabinet(&mut self) {
        if let Err(e) = self.engine.add(&self.form, Point3::ORIGIN) {
            tracing::warn!("Could not create the initial cabinet: {}", e);
        }
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn room(&self) -> &RoomContext {
        &self.room
    }

    pub fn cabinets(&self) -> &[Cabinet] {
        self.engine.cabinets()
    }

    pub fn current(&self) -> Option<&Cabinet> {
        self.engine.current()
    }

    /// Values in the parameter panel.
    pub fn form(&self) -> &CabinetParams {
        &self.form
    }

    pub fn set_placement_mode(&mut self, enabled: bool) {
        tracing::debug!("Placement mode {}", if enabled { "on" } else { "off" });
        self.placement_mode = enabled;
    }

    pub fn toggle_placement_mode(&mut self) -> bool {
        self.set_placement_mode(!self.placement_mode);
        self.placement_mode
    }

    /// Places a cabinet built from the panel values at a picked point.
    ///
    /// `None` means the pick missed every placement surface; nothing
    /// happens. Placing with placement mode off is refused.
    pub fn place_cabinet(&mut self, point: Option<Point3>) -> Result<Option<u64>> {
        if !self.placement_mode {
            tracing::warn!("Ignoring placement while placement mode is off");
            return Err(PlacementError::PlacementModeDisabled.into());
        }
        let Some(point) = point else {
            tracing::debug!("Placement pick hit nothing");
            return Ok(None);
        };
        let id = self.engine.insert(point, &self.form, &self.room)?;
        self.is_modified = true;
        Ok(Some(id))
    }

    /// Makes a cabinet current and loads its values into the panel.
    pub fn select_cabinet(&mut self, id: u64) -> Result<()> {
        self.engine.select(id)?;
        self.sync_form();
        Ok(())
    }

    /// Deletes the current cabinet and returns its id.
    pub fn delete_selected(&mut self) -> Result<u64> {
        let removed = self.engine.remove_current()?;
        self.sync_form();
        self.is_modified = true;
        Ok(removed.id())
    }

    /// Removes every cabinet and returns how many there were.
    pub fn clear_all(&mut self) -> Result<usize> {
        let count = self.engine.clear()?;
        self.is_modified = true;
        Ok(count)
    }

    pub(crate) fn sync_form(&mut self) {
        if let Some(current) = self.engine.current() {
            self.form = current.params();
        }
    }

    /// Advances every door animation one step.
    pub fn tick(&mut self) -> usize {
        self.engine.tick()
    }

    /// Sends every pending scene change to the renderer.
    pub fn flush(&mut self, renderer: &mut dyn SceneRenderer) {
        self.engine.flush(&mut self.room, renderer);
    }

    /// Drops pending scene changes without rendering them.
    pub fn discard_changes(&mut self) {
        self.engine.drain_changes();
        self.room.take_released();
    }

    /// Estimate under the session's cost policy.
    pub fn cost(&self) -> CostBreakdown {
        self.cost_with(self.settings.cost_policy)
    }

    pub fn cost_with(&self, policy: CostPolicy) -> CostBreakdown {
        estimate(
            policy,
            self.engine.cabinets(),
            self.engine.current(),
            &self.settings.cost_rates,
        )
    }

    /// Uploads a room photo, replacing any previous one.
    pub fn attach_room_photo(&mut self, payload: impl Into<String>) -> Result<u64> {
        let generation = self.room.attach_photo(payload)?;
        self.room_changed();
        Ok(generation)
    }

    /// Removes the room photo. Returns false when there was none.
    pub fn clear_room_photo(&mut self) -> bool {
        let cleared = self.room.clear_photo();
        if cleared {
            self.room_changed();
        }
        cleared
    }

    pub fn set_ceiling_height(&mut self, feet: f64) -> Result<()> {
        self.room.set_ceiling_height(feet)?;
        self.room_changed();
        Ok(())
    }

    pub fn toggle_3d_room(&mut self) -> bool {
        let shown = self.room.toggle_3d_room();
        self.room_changed();
        shown
    }

    fn room_changed(&mut self) {
        self.engine.queue(SceneChange::Room);
        self.is_modified = true;
    }
}
