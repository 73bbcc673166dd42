use cabinetkit_core::Point3;
use cabinetkit_designer::snapshot::{render_elevation, save_snapshot};
use cabinetkit_designer::{Cabinet, CabinetParams, DesignerState, RoomContext, SnapshotOptions};

#[test]
fn test_export_to_dir_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let state = DesignerState::new();
    let path = state.export_snapshot_to_dir(dir.path()).unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("cabinet-design-"));
    assert!(name.ends_with(".png"));

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.width(), 1024);
    assert_eq!(img.height(), 768);
}

#[test]
fn test_open_door_changes_the_picture() {
    let options = SnapshotOptions {
        width: 160,
        height: 120,
        margin: 8.0,
    };
    let room = RoomContext::new();
    let mut cab = Cabinet::create(1, &CabinetParams::default()).unwrap();
    cab.set_position(Point3::new(0.0, 1.5, 0.0));
    let closed = render_elevation(std::slice::from_ref(&cab), &room, &options).unwrap();

    cab.rest_door(true);
    let open = render_elevation(std::slice::from_ref(&cab), &room, &options).unwrap();
    assert_ne!(closed.as_raw(), open.as_raw());
}

#[test]
fn test_room_outline_is_drawn() {
    let options = SnapshotOptions {
        width: 300,
        height: 200,
        margin: 10.0,
    };
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain.png");
    let roomy = dir.path().join("room.png");

    save_snapshot(&plain, &[], &RoomContext::new(), &options).unwrap();
    let room = RoomContext::with_ceiling(8.0, true).unwrap();
    save_snapshot(&roomy, &[], &room, &options).unwrap();

    let a = image::open(&plain).unwrap().to_rgb8();
    let b = image::open(&roomy).unwrap().to_rgb8();
    assert_ne!(a.as_raw(), b.as_raw());
}
