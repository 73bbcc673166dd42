//! Parametric cabinet model.

mod cabinet;
mod shelf;

pub use cabinet::{
    BoxSize, Cabinet, CabinetGeometry, CabinetParams, DoorGeometry, DEFAULT_DEPTH_IN,
    DEFAULT_HEIGHT_IN, DEFAULT_SHELF_COUNT, DEFAULT_WIDTH_IN, DOOR_FACE_RATIO, DOOR_THICKNESS,
};
pub use shelf::{
    check_shelf_count, clamp_shelf_count, layout_shelves, Shelf, MAX_SHELF_COUNT, SHELF_SPAN_RATIO,
    SHELF_THICKNESS,
};
