use cabinetkit_core::{CabinetColor, Error, PlacementError, Point3};
use cabinetkit_designer::{
    CostPolicy, DesignerState, Dimension, RoomContext, SceneLog, SessionSettings,
};

#[test]
fn test_session_starts_with_one_current_cabinet() {
    let state = DesignerState::new();
    assert_eq!(state.cabinets().len(), 1);
    let current = state.current().unwrap();
    assert_eq!(current.width_in(), 24.0);
    assert_eq!(current.shelves().len(), 2);
    assert!(!state.placement_mode);
}

#[test]
fn test_placed_cabinet_uses_panel_values() {
    let mut state = DesignerState::new();
    state.set_dimension(Dimension::Width, 30.0).unwrap();
    state.set_color("Dark Blue").unwrap();
    state.set_shelf_count(3).unwrap();
    state.set_placement_mode(true);
    let id = state.place_cabinet(Some(Point3::new(4.0, 0.0, 0.0))).unwrap().unwrap();

    let placed = state.engine().get(id).unwrap();
    assert_eq!(placed.width_in(), 30.0);
    assert_eq!(placed.color(), CabinetColor::DarkBlue);
    assert_eq!(placed.shelf_count(), 3);
    assert_eq!(state.current().unwrap().id(), id);
}

#[test]
fn test_selecting_loads_panel() {
    let mut state = DesignerState::new();
    let first = state.current().unwrap().id();
    state.set_placement_mode(true);
    state.set_dimension(Dimension::Height, 48.0).unwrap();
    state.place_cabinet(Some(Point3::ORIGIN)).unwrap();
    state.select_cabinet(first).unwrap();
    assert_eq!(state.form().height_in, 48.0);
    assert!(matches!(
        state.select_cabinet(99),
        Err(Error::Placement(PlacementError::UnknownCabinet { id: 99 }))
    ));
}

#[test]
fn test_edits_only_touch_current() {
    let mut state = DesignerState::new();
    let first = state.current().unwrap().id();
    state.set_placement_mode(true);
    state.place_cabinet(Some(Point3::new(3.0, 0.0, 0.0))).unwrap();
    state.set_color("White").unwrap();
    assert_eq!(state.engine().get(first).unwrap().color(), CabinetColor::Gray);
    assert_eq!(state.current().unwrap().color(), CabinetColor::White);
}

#[test]
fn test_flush_orders_scene_updates() {
    let mut state = DesignerState::new();
    let mut log = SceneLog::new();
    state.flush(&mut log);
    log.entries.clear();

    state.toggle_hollow().unwrap();
    state.set_color("Black").unwrap();
    state.flush(&mut log);
    assert_eq!(log.entries, vec!["hollow 1 true", "appearance 1 Black"]);

    // nothing pending
    log.entries.clear();
    state.flush(&mut log);
    assert!(log.entries.is_empty());
}

#[test]
fn test_volumetric_cost_tracks_current() {
    let settings = SessionSettings {
        cost_policy: CostPolicy::Volumetric,
        ..Default::default()
    };
    let mut state = DesignerState::with_settings(settings, RoomContext::new());
    state.set_material("solid-wood").unwrap();
    state.set_finish("painted").unwrap();
    // 6 cu ft * 15 * 2.5 + 50
    assert!((state.cost().total - 275.0).abs() < 1e-9);

    state.delete_selected().unwrap();
    assert_eq!(state.cost().total, 0.0);
}

#[test]
fn test_aluminum_cost_covers_collection() {
    let mut state = DesignerState::new();
    state.set_placement_mode(true);
    state.place_cabinet(Some(Point3::ORIGIN)).unwrap();
    assert!((state.cost_with(CostPolicy::AluminumFrame).total - 588.0).abs() < 1e-9);
}

#[test]
fn test_modified_flag_and_display_name() {
    let mut state = DesignerState::new();
    assert_eq!(state.display_name(), "Untitled");
    state.set_shelf_count(1).unwrap();
    assert_eq!(state.display_name(), "Untitled*");
}
