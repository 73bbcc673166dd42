use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cabinetkit_core::{CabinetType, PlacementError, Point3};
use cabinetkit_designer::room::PHOTO_PLANE_Z;
use cabinetkit_designer::{
    CabinetParams, PlacementEngine, RoomContext, SceneChange, SceneLog, WALL_MOUNT_OFFSET,
};

fn photo_url(width: u32, height: u32) -> String {
    let img = image::RgbImage::new(width, height);
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

fn typed(cabinet_type: CabinetType, height_in: f64) -> CabinetParams {
    CabinetParams {
        cabinet_type,
        height_in,
        ..Default::default()
    }
}

#[test]
fn test_base_cabinet_on_ground_plane() {
    let mut engine = PlacementEngine::new();
    let id = engine
        .insert(Point3::new(1.0, 0.0, -2.0), &typed(CabinetType::Base, 36.0), &RoomContext::new())
        .unwrap();
    let cab = engine.get(id).unwrap();
    assert_eq!(cab.position(), Point3::new(1.0, 1.5, -2.0));
}

#[test]
fn test_wall_cabinet_offset() {
    let mut engine = PlacementEngine::new();
    let id = engine
        .insert(Point3::ORIGIN, &typed(CabinetType::Wall, 30.0), &RoomContext::new())
        .unwrap();
    assert_eq!(engine.get(id).unwrap().position().y, 1.25 + WALL_MOUNT_OFFSET);
}

#[test]
fn test_photo_plane_hit_lands_on_floor() {
    let mut room = RoomContext::new();
    room.attach_photo(photo_url(16, 9)).unwrap();
    let mut engine = PlacementEngine::new();
    let id = engine
        .insert(Point3::new(2.0, 3.7, PHOTO_PLANE_Z), &typed(CabinetType::Tall, 84.0), &room)
        .unwrap();
    let p = engine.get(id).unwrap().position();
    assert_eq!(p.x, 2.0);
    assert_eq!(p.z, PHOTO_PLANE_Z);
    assert_eq!(p.y, 3.5);
}

#[test]
fn test_wall_cabinet_under_low_ceiling() {
    let room = RoomContext::with_ceiling(7.0, true).unwrap();
    let mut engine = PlacementEngine::new();
    let id = engine
        .insert(Point3::ORIGIN, &typed(CabinetType::Wall, 36.0), &room)
        .unwrap();
    // top lands exactly on the ceiling
    let y = engine.get(id).unwrap().position().y;
    assert_eq!(y, 5.5);
    assert_eq!(room.ceiling_overflow(y, 1.5), None);

    // a lower ceiling is reported, the offset stays half height + 4
    let room = RoomContext::with_ceiling(6.0, true).unwrap();
    let id = engine
        .insert(Point3::ORIGIN, &typed(CabinetType::Wall, 36.0), &room)
        .unwrap();
    let y = engine.get(id).unwrap().position().y;
    assert_eq!(y, 5.5);
    assert_eq!(room.ceiling_overflow(y, 1.5), Some(1.0));
}

#[test]
fn test_hidden_room_reports_no_overflow() {
    let room = RoomContext::with_ceiling(6.5, false).unwrap();
    let mut engine = PlacementEngine::new();
    let id = engine
        .insert(Point3::ORIGIN, &typed(CabinetType::Wall, 36.0), &room)
        .unwrap();
    let y = engine.get(id).unwrap().position().y;
    assert_eq!(y, 5.5);
    assert_eq!(room.ceiling_overflow(y, 1.5), None);
}

#[test]
fn test_ids_are_unique_after_removal() {
    let mut engine = PlacementEngine::new();
    let room = RoomContext::new();
    let a = engine.insert(Point3::ORIGIN, &CabinetParams::default(), &room).unwrap();
    engine.remove(a).unwrap();
    let b = engine.insert(Point3::ORIGIN, &CabinetParams::default(), &room).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_remove_unknown_cabinet() {
    let mut engine = PlacementEngine::new();
    let room = RoomContext::new();
    engine.insert(Point3::ORIGIN, &CabinetParams::default(), &room).unwrap();
    assert_eq!(
        engine.remove(42).unwrap_err(),
        PlacementError::UnknownCabinet { id: 42 }
    );
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_clear_then_flush() {
    let mut engine = PlacementEngine::new();
    let mut room = RoomContext::new();
    engine.insert(Point3::ORIGIN, &CabinetParams::default(), &room).unwrap();
    engine.insert(Point3::ORIGIN, &CabinetParams::default(), &room).unwrap();
    assert_eq!(engine.clear().unwrap(), 2);
    assert!(engine.current().is_none());
    assert_eq!(engine.pending_changes(), &[SceneChange::Cleared]);

    let mut log = SceneLog::new();
    engine.flush(&mut room, &mut log);
    assert_eq!(log.entries, vec!["clear".to_string()]);
}

#[test]
fn test_edit_state_is_applied_before_render() {
    let mut engine = PlacementEngine::new();
    let mut room = RoomContext::new();
    engine.insert(Point3::ORIGIN, &CabinetParams::default(), &room).unwrap();
    engine.drain_changes();

    let cab = engine.require_current_mut().unwrap();
    let resize = cab.set_dimensions(Some(30.0), None, None).unwrap();
    let shelves = cab.set_shelf_count(4);
    engine.queue(resize);
    engine.queue(shelves);

    let mut log = SceneLog::new();
    engine.flush(&mut room, &mut log);
    // both calls see the final state
    assert_eq!(log.entries[0], "rebuild 1 30x36x12 shelves=4");
    assert_eq!(log.entries[1], "shelves 1 4");
}
