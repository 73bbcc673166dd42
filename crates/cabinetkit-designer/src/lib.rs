//! # CabinetKit Designer
//!
//! Parametric cabinet modelling and placement. A design is a collection of
//! box cabinets, each rebuilt from its dimensions, shelf count and type,
//! placed against a floor plane, a room photo or a 3D room.
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (session: parameter panel, placement mode, files)
//!   ├── PlacementEngine (collection, current cabinet, scene queue)
//!   │     └── Cabinet (dimensions, shelves, door animator)
//!   ├── RoomContext (photo plane, ceiling, 3D room)
//!   └── Cost (aluminum frame / volumetric)
//!
//! SceneRenderer (external; receives queued SceneChanges on flush)
//! Serialization (JSON design files)
//! Snapshot (PNG front elevation)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cabinetkit_designer::{DesignerState, SceneLog};
//! use cabinetkit_core::Point3;
//!
//! let mut state = DesignerState::new();
//! state.set_placement_mode(true);
//! state.set_cabinet_type("wall")?;
//! state.place_cabinet(Some(Point3::new(3.0, 0.0, 0.0)))?;
//!
//! let mut log = SceneLog::new();
//! state.flush(&mut log);
//! println!("{}", state.cost());
//! ```

pub mod animation;
pub mod cost;
pub mod designer_state;
pub mod model;
pub mod placement;
pub mod renderer;
pub mod room;
pub mod serialization;
pub mod snapshot;

pub use animation::{DoorAnimator, DOOR_CLOSED_ANGLE, DOOR_DAMPING, DOOR_OPEN_ANGLE, DOOR_SNAP_EPSILON};
pub use cost::{CostBreakdown, CostPolicy, CostRates};
pub use designer_state::{DesignerState, Dimension, SessionSettings};
pub use model::{Cabinet, CabinetGeometry, CabinetParams, Shelf};
pub use placement::{placement_position, PlacementEngine, WALL_MOUNT_OFFSET};
pub use renderer::{SceneChange, SceneLog, SceneRenderer};
pub use room::{RoomBounds, RoomContext, RoomPhoto};
pub use serialization::{CabinetData, DesignFile, LoadedDesign, PhotoUpdate, FILE_FORMAT_VERSION};
pub use snapshot::{SnapshotError, SnapshotOptions};
