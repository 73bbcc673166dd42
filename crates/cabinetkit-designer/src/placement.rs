//! Placement engine.
//!
//! Owns the collection of placed cabinets and the current-cabinet pointer,
//! and queues the scene changes produced by edits until they are flushed
//! into a [`SceneRenderer`].

use cabinetkit_core::units::inches_to_units;
use cabinetkit_core::{CabinetError, PlacementError, Point3};

use crate::model::{Cabinet, CabinetParams};
use crate::renderer::{SceneChange, SceneRenderer};
use crate::room::RoomContext;

/// Extra lift for wall cabinets above the placement point, in scene units
pub const WALL_MOUNT_OFFSET: f64 = 4.0;

/// Computes where a new cabinet's center goes for a placement hit.
///
/// Base and tall cabinets stand on the floor under the hit; wall cabinets
/// hang [`WALL_MOUNT_OFFSET`] higher. The ceiling never moves a cabinet;
/// see [`RoomContext::ceiling_overflow`].
pub fn placement_position(point: Point3, params: &CabinetParams, room: &RoomContext) -> Point3 {
    let mut y = room.floor_under(point) + half_height_units(params);
    if params.cabinet_type.is_wall_mounted() {
        y += WALL_MOUNT_OFFSET;
    }
    Point3::new(point.x, y, point.z)
}

fn half_height_units(params: &CabinetParams) -> f64 {
    inches_to_units(params.height_in) / 2.0
}

/// The collection of cabinets in the design.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    cabinets: Vec<Cabinet>,
    current: Option<u64>,
    next_id: u64,
    pending: Vec<SceneChange>,
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementEngine {
    pub fn new() -> Self {
        Self {
            cabinets: Vec::new(),
            current: None,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cabinets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cabinets.is_empty()
    }

    /// Cabinets in insertion order.
    pub fn cabinets(&self) -> &[Cabinet] {
        &self.cabinets
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cabinet> {
        self.cabinets.iter()
    }

    pub fn get(&self, id: u64) -> Option<&Cabinet> {
        self.cabinets.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Cabinet> {
        self.cabinets.iter_mut().find(|c| c.id() == id)
    }

    pub fn current_id(&self) -> Option<u64> {
        self.current
    }

    pub fn current(&self) -> Option<&Cabinet> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn current_mut(&mut self) -> Option<&mut Cabinet> {
        let id = self.current?;
        self.get_mut(id)
    }

    /// The current cabinet, or [`PlacementError::NoSelection`].
    pub fn require_current_mut(&mut self) -> Result<&mut Cabinet, PlacementError> {
        self.current_mut().ok_or(PlacementError::NoSelection)
    }

    /// Makes an existing cabinet current.
    pub fn select(&mut self, id: u64) -> Result<(), PlacementError> {
        if self.get(id).is_none() {
            return Err(PlacementError::UnknownCabinet { id });
        }
        self.current = Some(id);
        Ok(())
    }

    /// Adds a cabinet at an exact position and makes it current.
    pub fn add(&mut self, params: &CabinetParams, position: Point3) -> Result<u64, CabinetError> {
        let id = self.next_id;
        let mut cabinet = Cabinet::create(id, params)?;
        self.next_id += 1;
        cabinet.set_position(position);
        self.cabinets.push(cabinet);
        self.current = Some(id);
        self.pending.push(SceneChange::Added(id));
        Ok(id)
    }

    /// Creates a cabinet from `params`, places it for the hit `point`, and
    /// makes it current.
    pub fn insert(
        &mut self,
        point: Point3,
        params: &CabinetParams,
        room: &RoomContext,
    ) -> Result<u64, CabinetError> {
        let position = placement_position(point, params, room);
        let id = self.add(params, position)?;
        tracing::info!(
            "Inserted {} cabinet {} at {}",
            params.cabinet_type,
            id,
            position
        );
        if let Some(excess) = room.ceiling_overflow(position.y, half_height_units(params)) {
            tracing::warn!("Cabinet {} rises {:.2} ft above the ceiling", id, excess);
        }
        Ok(id)
    }

    /// Removes a cabinet. The last remaining cabinet becomes current.
    ///
    /// With nothing selected this is a reported no-op.
    pub fn remove(&mut self, id: u64) -> Result<Cabinet, PlacementError> {
        if self.current.is_none() {
            tracing::warn!("Delete requested with no cabinet selected");
            return Err(PlacementError::NoSelection);
        }
        let index = self
            .cabinets
            .iter()
            .position(|c| c.id() == id)
            .ok_or(PlacementError::UnknownCabinet { id })?;

        let removed = self.cabinets.remove(index);
        self.current = self.cabinets.last().map(Cabinet::id);
        self.pending.push(SceneChange::Removed(id));
        tracing::info!(
            "Removed cabinet {}, {} remaining",
            id,
            self.cabinets.len()
        );
        Ok(removed)
    }

    /// Removes the current cabinet.
    pub fn remove_current(&mut self) -> Result<Cabinet, PlacementError> {
        match self.current {
            Some(id) => self.remove(id),
            None => {
                tracing::warn!("Delete requested with no cabinet selected");
                Err(PlacementError::NoSelection)
            }
        }
    }

    /// Removes every cabinet. Returns how many were removed.
    ///
    /// On an empty collection this is a reported no-op.
    pub fn clear(&mut self) -> Result<usize, PlacementError> {
        if self.cabinets.is_empty() {
            tracing::warn!("Clear requested on an empty design");
            return Err(PlacementError::NothingToClear);
        }
        let count = self.cabinets.len();
        self.cabinets.clear();
        self.current = None;
        self.pending.retain(|c| c.cabinet_id().is_none());
        self.pending.push(SceneChange::Cleared);
        tracing::info!("Cleared {} cabinets", count);
        Ok(count)
    }

    /// Swaps in a fully built collection, as produced by a design load.
    /// The first cabinet becomes current.
    pub fn replace_all(&mut self, cabinets: Vec<Cabinet>) {
        self.next_id = cabinets.iter().map(Cabinet::id).max().unwrap_or(0) + 1;
        self.current = cabinets.first().map(Cabinet::id);
        self.cabinets = cabinets;
        self.pending.clear();
        self.pending.push(SceneChange::Cleared);
        let added: Vec<SceneChange> = self.cabinets.iter().map(|c| SceneChange::Added(c.id())).collect();
        self.pending.extend(added);
    }

    /// Advances every door one animation step.
    /// Returns the number of doors that moved.
    pub fn tick(&mut self) -> usize {
        let moved: Vec<SceneChange> = self
            .cabinets
            .iter_mut()
            .filter_map(Cabinet::step_door)
            .collect();
        let count = moved.len();
        self.pending.extend(moved);
        count
    }

    /// Whether any door is still swinging.
    pub fn is_animating(&self) -> bool {
        self.cabinets.iter().any(|c| !c.door().is_settled())
    }

    pub fn queue(&mut self, change: SceneChange) {
        self.pending.push(change);
    }

    pub fn pending_changes(&self) -> &[SceneChange] {
        &self.pending
    }

    pub fn drain_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.pending)
    }

    /// Hands every queued change to the renderer, in order.
    ///
    /// Changes for cabinets that no longer exist are dropped.
    pub fn flush(&mut self, room: &mut RoomContext, renderer: &mut dyn SceneRenderer) {
        for change in self.drain_changes() {
            match change {
                SceneChange::Removed(id) => renderer.remove_cabinet(id),
                SceneChange::Cleared => renderer.clear_cabinets(),
                SceneChange::Room => {
                    let released = room.take_released();
                    renderer.update_room(room, &released);
                }
                other => {
                    let Some(cabinet) = other.cabinet_id().and_then(|id| self.get(id)) else {
                        continue;
                    };
                    match other {
                        SceneChange::Rebuild(_) => renderer.rebuild_cabinet(cabinet),
                        SceneChange::Appearance(_) => renderer.update_appearance(cabinet),
                        SceneChange::Visibility(_) => renderer.set_hollow(cabinet),
                        SceneChange::Shelves(_) => renderer.update_shelves(cabinet),
                        SceneChange::Transform(_) => renderer.place_cabinet(cabinet),
                        SceneChange::Door(_) => renderer.set_door_angle(cabinet),
                        SceneChange::Added(_) => {
                            renderer.rebuild_cabinet(cabinet);
                            renderer.place_cabinet(cabinet);
                        }
                        SceneChange::Removed(_) | SceneChange::Cleared | SceneChange::Room => {}
                    }
                }
            }
        }
    }
}
