//! Rendering collaborator interface.
//!
//! The model never draws anything itself. Every mutation produces a
//! [`SceneChange`], the placement engine queues them, and once the whole
//! collection has been updated for the current event or tick the queue is
//! flushed into a [`SceneRenderer`]. The renderer always rebuilds its
//! representation from the cabinet entity, never the other way round.

use crate::model::Cabinet;
use crate::room::RoomContext;

/// A pending update for the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneChange {
    /// Dimensions changed: destroy and recreate the cabinet's representation
    Rebuild(u64),
    /// Only the color changed
    Appearance(u64),
    /// The hollow flag flipped: swap solid and open representations
    Visibility(u64),
    /// The shelf set changed
    Shelves(u64),
    /// Position or rotation changed
    Transform(u64),
    /// The door moved one animation step
    Door(u64),
    /// A new cabinet joined the scene
    Added(u64),
    /// A cabinet left the scene
    Removed(u64),
    /// Every cabinet left the scene
    Cleared,
    /// Room photo, ceiling height or room visibility changed
    Room,
}

impl SceneChange {
    /// Cabinet this change refers to, if any.
    pub fn cabinet_id(&self) -> Option<u64> {
        match self {
            Self::Rebuild(id)
            | Self::Appearance(id)
            | Self::Visibility(id)
            | Self::Shelves(id)
            | Self::Transform(id)
            | Self::Door(id)
            | Self::Added(id)
            | Self::Removed(id) => Some(*id),
            Self::Cleared | Self::Room => None,
        }
    }
}

/// Receives scene updates. Every method has a no-op default so a renderer
/// only implements what it draws.
pub trait SceneRenderer {
    /// Build (or rebuild) the full representation of a cabinet.
    fn rebuild_cabinet(&mut self, _cabinet: &Cabinet) {}

    /// Recolor body, wireframe and door.
    fn update_appearance(&mut self, cabinet: &Cabinet) {
        self.rebuild_cabinet(cabinet);
    }

    /// Show the solid body or the open/wireframe body.
    fn set_hollow(&mut self, _cabinet: &Cabinet) {}

    /// Replace the shelf meshes.
    fn update_shelves(&mut self, cabinet: &Cabinet) {
        self.rebuild_cabinet(cabinet);
    }

    /// Move the representation to the cabinet's position and rotation.
    fn place_cabinet(&mut self, _cabinet: &Cabinet) {}

    /// Rotate only the door about its hinge edge.
    fn set_door_angle(&mut self, _cabinet: &Cabinet) {}

    /// Drop the representation of a removed cabinet.
    fn remove_cabinet(&mut self, _id: u64) {}

    /// Drop every cabinet representation.
    fn clear_cabinets(&mut self) {}

    /// Refresh the room backdrop. Textures for photo generations listed in
    /// `released` must be freed.
    fn update_room(&mut self, _room: &RoomContext, _released: &[u64]) {}
}

/// A renderer that records the calls it receives, one line per call.
///
/// Useful headless: the CLI uses it to trace scene traffic, and tests
/// use it to check what a flush emitted.
#[derive(Debug, Clone, Default)]
pub struct SceneLog {
    pub entries: Vec<String>,
}

impl SceneLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded calls whose text starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.entries.iter().filter(|e| e.starts_with(prefix)).count()
    }
}

impl SceneRenderer for SceneLog {
    fn rebuild_cabinet(&mut self, cabinet: &Cabinet) {
        self.entries.push(format!(
            "rebuild {} {}x{}x{} shelves={}",
            cabinet.id(),
            cabinet.width_in(),
            cabinet.height_in(),
            cabinet.depth_in(),
            cabinet.shelf_count()
        ));
    }

    fn update_appearance(&mut self, cabinet: &Cabinet) {
        self.entries
            .push(format!("appearance {} {}", cabinet.id(), cabinet.color()));
    }

    fn set_hollow(&mut self, cabinet: &Cabinet) {
        self.entries
            .push(format!("hollow {} {}", cabinet.id(), cabinet.is_hollow()));
    }

    fn update_shelves(&mut self, cabinet: &Cabinet) {
        self.entries
            .push(format!("shelves {} {}", cabinet.id(), cabinet.shelf_count()));
    }

    fn place_cabinet(&mut self, cabinet: &Cabinet) {
        self.entries
            .push(format!("place {} {}", cabinet.id(), cabinet.position()));
    }

    fn set_door_angle(&mut self, cabinet: &Cabinet) {
        self.entries.push(format!(
            "door {} {:.4}",
            cabinet.id(),
            cabinet.door().angle()
        ));
    }

    fn remove_cabinet(&mut self, id: u64) {
        self.entries.push(format!("remove {}", id));
    }

    fn clear_cabinets(&mut self) {
        self.entries.push("clear".to_string());
    }

    fn update_room(&mut self, room: &RoomContext, released: &[u64]) {
        self.entries.push(format!(
            "room photo={} ceiling={} shown={} released={:?}",
            room.has_photo(),
            room.ceiling_height_ft(),
            room.is_3d_room_shown(),
            released
        ));
    }
}
