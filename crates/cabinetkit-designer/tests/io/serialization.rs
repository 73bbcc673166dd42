use std::io::Cursor;

use proptest::prelude::*;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cabinetkit_core::{
    CabinetColor, CabinetError, CabinetType, DesignError, Euler, Finish, Material, Point3,
};
use cabinetkit_designer::serialization::{load, save};
use cabinetkit_designer::{
    CabinetParams, DesignFile, DesignerState, PlacementEngine, RoomContext, FILE_FORMAT_VERSION,
};
use serde_json::Value;

fn photo_url() -> String {
    let img = image::RgbImage::new(8, 6);
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}

#[test]
fn test_document_uses_contract_keys() {
    let mut engine = PlacementEngine::new();
    let room = RoomContext::new();
    engine
        .insert(Point3::new(1.0, 0.0, 2.0), &Default::default(), &room)
        .unwrap();

    let json = save(&engine, &room).to_json().unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], FILE_FORMAT_VERSION);
    assert!(value["roomPhoto"].is_null());
    assert_eq!(value["ceilingHeight"], 8.0);

    let cab = &value["cabinets"][0];
    for key in [
        "position", "rotation", "widthIn", "heightIn", "depthIn", "color", "shelfCount", "type",
    ] {
        assert!(cab.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(cab["position"], serde_json::json!([1.0, 1.5, 2.0]));
    assert_eq!(cab["color"], "Gray");
    assert_eq!(cab["type"], "base");
}

#[test]
fn test_loads_minimal_contract_document() {
    let json = r#"{
        "version": "1.0",
        "roomPhoto": null,
        "ceilingHeight": 9,
        "cabinets": [
            {"position":[0,1.5,0],"rotation":[0,0,0],"widthIn":24,"heightIn":36,
             "depthIn":12,"color":"Dark Blue","shelfCount":2,"type":"base"},
            {"position":[3,5.5,0],"rotation":[0,1.5708,0],"widthIn":30,"heightIn":36,
             "depthIn":12,"color":"White","shelfCount":1,"type":"wall"}
        ]
    }"#;
    let loaded = load(json).unwrap();
    assert_eq!(loaded.cabinets.len(), 2);
    assert_eq!(loaded.ceiling_height_ft, Some(9.0));
    assert_eq!(loaded.cabinets[0].color(), CabinetColor::DarkBlue);
    assert_eq!(loaded.cabinets[1].cabinet_type(), CabinetType::Wall);
    assert_eq!(loaded.cabinets[1].rotation().y, 1.5708);
    assert!(!loaded.cabinets[0].is_door_open());
}

#[test]
fn test_save_load_preserves_design() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kitchen.json");

    let mut state = DesignerState::new();
    state.attach_room_photo(photo_url()).unwrap();
    state.set_ceiling_height(8.5).unwrap();
    state.set_material("mdf").unwrap();
    state.set_finish("stained").unwrap();
    state.toggle_door().unwrap();
    state.save_to_file(&path).unwrap();

    let mut restored = DesignerState::new();
    restored.load_from_file(&path).unwrap();
    let cab = restored.current().unwrap();
    assert_eq!(cab.material().key(), "mdf");
    assert_eq!(cab.finish().key(), "stained");
    assert!(cab.is_door_open());
    assert!(cab.door().is_settled());
    assert_eq!(restored.room().ceiling_height_ft(), 8.5);
    assert_eq!(restored.room().photo().unwrap().dimensions(), (8, 6));
    assert_eq!(restored.display_name(), "kitchen.json");

    // what was saved is what comes back out
    assert_eq!(restored.to_design_file(), state.to_design_file());
}

#[test]
fn test_missing_dimension_leaves_collection_intact() {
    let mut state = DesignerState::new();
    state.set_placement_mode(true);
    state.place_cabinet(Some(Point3::ORIGIN)).unwrap();

    let json = r#"{"version":"1.0","cabinets":[
        {"position":[0,0,0],"rotation":[0,0,0],"widthIn":24,"heightIn":36,
         "depthIn":12,"color":"Gray","shelfCount":2,"type":"base"},
        {"position":[0,0,0],"rotation":[0,0,0],"heightIn":36,
         "depthIn":12,"color":"Gray","shelfCount":2,"type":"base"}
    ]}"#;
    match DesignFile::from_json(json) {
        Err(DesignError::MissingField { index: 1, field: "widthIn" }) => {}
        other => panic!("unexpected {:?}", other),
    }
    assert!(state.load_json(json).is_err());
    assert_eq!(state.cabinets().len(), 2);
}

#[test]
fn test_oversized_shelf_count_is_rejected() {
    let json = r#"{"version":"1.0","cabinets":[
        {"position":[0,1.5,0],"rotation":[0,0,0],"widthIn":24,"heightIn":36,
         "depthIn":12,"color":"Gray","shelfCount":4294967295,"type":"base"}
    ]}"#;
    match load(json) {
        Err(DesignError::InvalidCabinet {
            index: 0,
            source: CabinetError::TooManyShelves { count: 4_294_967_295, .. },
        }) => {}
        other => panic!("unexpected {:?}", other.map(|d| d.cabinets.len())),
    }

    let mut state = DesignerState::new();
    assert!(state.load_json(json).is_err());
    assert_eq!(state.cabinets().len(), 1);
}

#[test]
fn test_bad_photo_fails_whole_load() {
    let mut state = DesignerState::new();
    let json = r#"{"version":"1.0","roomPhoto":"data:image/png;base64,AAAA","cabinets":[]}"#;
    assert!(state.load_json(json).is_err());
    assert_eq!(state.cabinets().len(), 1);
}

#[test]
fn test_room_photo_key_states() {
    let mut state = DesignerState::new();
    state.attach_room_photo(photo_url()).unwrap();

    // absent key keeps the photo
    state.load_json(r#"{"version":"1.0","cabinets":[]}"#).unwrap();
    assert!(state.room().has_photo());

    // explicit null clears it
    state
        .load_json(r#"{"version":"1.0","roomPhoto":null,"cabinets":[]}"#)
        .unwrap();
    assert!(!state.room().has_photo());
}

#[test]
fn test_empty_document_clears_design() {
    let mut state = DesignerState::new();
    assert_eq!(state.load_json(r#"{"version":"1.0","cabinets":[]}"#).unwrap(), 0);
    assert!(state.cabinets().is_empty());
    assert!(state.current().is_none());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = DesignFile::load_from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DesignError::Io(_)));
}

fn arb_params() -> impl Strategy<Value = CabinetParams> {
    (
        (2u32..192, 2u32..192, 2u32..96),
        prop::sample::select(vec![
            CabinetColor::Gray,
            CabinetColor::White,
            CabinetColor::Black,
            CabinetColor::DarkBlue,
        ]),
        prop::sample::select(vec![Material::Plywood, Material::Mdf, Material::SolidWood]),
        prop::sample::select(vec![Finish::None, Finish::Painted, Finish::Stained]),
        prop::sample::select(vec![CabinetType::Base, CabinetType::Wall, CabinetType::Tall]),
        0u32..8,
    )
        .prop_map(|((w, h, d), color, material, finish, cabinet_type, shelf_count)| CabinetParams {
            width_in: w as f64 / 2.0,
            height_in: h as f64 / 2.0,
            depth_in: d as f64 / 2.0,
            cabinet_type,
            color,
            material,
            finish,
            shelf_count,
        })
}

proptest! {
    #[test]
    fn saved_designs_load_back_unchanged(
        cabinets in prop::collection::vec(
            (arb_params(), -40i32..40, -40i32..40, (-8i32..8, -8i32..8, -8i32..8)),
            0..6,
        ),
        ceiling in 6u32..16,
    ) {
        let mut engine = PlacementEngine::new();
        let room = RoomContext::with_ceiling(ceiling as f64, false).unwrap();
        for (params, x, z, (rx, ry, rz)) in &cabinets {
            let position = Point3::new(*x as f64 / 4.0, 1.0, *z as f64 / 4.0);
            let id = engine.add(params, position).unwrap();
            let rotation = Euler::new(*rx as f64 / 4.0, *ry as f64 / 4.0, *rz as f64 / 4.0);
            engine.get_mut(id).unwrap().set_rotation(rotation);
        }

        let json = save(&engine, &room).to_json().unwrap();
        let loaded = load(&json).unwrap();

        prop_assert_eq!(loaded.ceiling_height_ft, Some(ceiling as f64));
        prop_assert_eq!(loaded.cabinets.len(), engine.len());
        for (restored, original) in loaded.cabinets.iter().zip(engine.iter()) {
            prop_assert_eq!(restored.params(), original.params());
            prop_assert_eq!(restored.position(), original.position());
            prop_assert_eq!(restored.rotation(), original.rotation());
        }
    }
}
