use proptest::prelude::*;

use cabinetkit_core::{Euler, Point3};
use cabinetkit_designer::animation::{ease_toward, DOOR_OPEN_ANGLE};
use cabinetkit_designer::cost::{aluminum_frame_cost, volumetric_cost};
use cabinetkit_designer::model::layout_shelves;
use cabinetkit_designer::{Cabinet, CabinetParams, CostRates, DoorAnimator};

/// Grows one dimension of `base` by `extra` inches. 0 = width, 1 = height, 2 = depth.
fn grow(base: (f64, f64, f64), axis: u8, extra: f64) -> (f64, f64, f64) {
    let (w, h, d) = base;
    match axis {
        0 => (w + extra, h, d),
        1 => (w, h + extra, d),
        _ => (w, h, d + extra),
    }
}

fn params(w: f64, h: f64, d: f64, shelves: u32) -> CabinetParams {
    CabinetParams {
        width_in: w,
        height_in: h,
        depth_in: d,
        shelf_count: shelves,
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn shelves_stay_inside_the_body(h in 1.0f64..120.0, count in 0u32..12) {
        let height = h / 12.0;
        let shelves = layout_shelves(2.0, height, 1.0, count);
        prop_assert_eq!(shelves.len(), count as usize);
        for pair in shelves.windows(2) {
            prop_assert!(pair[0].y < pair[1].y);
        }
        for shelf in &shelves {
            prop_assert!(shelf.y > -height / 2.0);
            prop_assert!(shelf.y < height / 2.0);
        }
    }

    #[test]
    fn door_always_settles_on_target(start in -3.0f64..1.0, open in any::<bool>()) {
        let mut door = DoorAnimator::new(!open);
        door.set_angle(start);
        door.set_open(open);
        let mut ticks = 0;
        while door.step() {
            ticks += 1;
            prop_assert!(ticks < 200);
        }
        prop_assert_eq!(door.angle(), door.target());
    }

    #[test]
    fn easing_never_overshoots(current in -3.0f64..1.0) {
        let next = ease_toward(current, DOOR_OPEN_ANGLE);
        let (lo, hi) = if current < DOOR_OPEN_ANGLE {
            (current, DOOR_OPEN_ANGLE)
        } else {
            (DOOR_OPEN_ANGLE, current)
        };
        prop_assert!(next >= lo && next <= hi);
    }

    #[test]
    fn aluminum_cost_grows_with_width(w in 6.0f64..60.0, extra in 0.5f64..24.0) {
        let rates = CostRates::default();
        let small = Cabinet::create(1, &params(w, 36.0, 12.0, 2)).unwrap();
        let large = Cabinet::create(2, &params(w + extra, 36.0, 12.0, 2)).unwrap();
        prop_assert!(aluminum_frame_cost(&large, &rates).total > aluminum_frame_cost(&small, &rates).total);
        prop_assert!(volumetric_cost(&large, &rates).total > volumetric_cost(&small, &rates).total);
    }

    #[test]
    fn resize_keeps_identity_and_placement(
        w in 6.0f64..60.0,
        h in 6.0f64..96.0,
        d in 6.0f64..30.0,
    ) {
        let mut cab = Cabinet::create(7, &CabinetParams::default()).unwrap();
        cab.set_position(Point3::new(1.0, 2.0, 3.0));
        cab.toggle_door();
        cab.set_dimensions(Some(w), Some(h), Some(d)).unwrap();
        prop_assert_eq!(cab.id(), 7);
        prop_assert_eq!(cab.position(), Point3::new(1.0, 2.0, 3.0));
        prop_assert!(cab.is_door_open());
        prop_assert_eq!(cab.shelves().len(), 2);
    }

    #[test]
    fn material_cost_never_drops_as_a_dimension_grows(
        w in 6.0f64..60.0,
        h in 6.0f64..96.0,
        d in 6.0f64..30.0,
        axis in 0u8..3,
        extra in 0.0f64..24.0,
    ) {
        let rates = CostRates::default();
        let (gw, gh, gd) = grow((w, h, d), axis, extra);
        let small = Cabinet::create(1, &params(w, h, d, 2)).unwrap();
        let large = Cabinet::create(2, &params(gw, gh, gd, 2)).unwrap();

        let (before, after) = (aluminum_frame_cost(&small, &rates), aluminum_frame_cost(&large, &rates));
        prop_assert!(after.material >= before.material);
        prop_assert!(after.total >= before.total);

        let (before, after) = (volumetric_cost(&small, &rates), volumetric_cost(&large, &rates));
        prop_assert!(after.material >= before.material);
        prop_assert!(after.total >= before.total);
    }

    #[test]
    fn shelf_cost_never_drops_as_shelves_are_added(count in 0u32..50, more in 0u32..50) {
        let rates = CostRates::default();
        let few = Cabinet::create(1, &params(24.0, 36.0, 12.0, count)).unwrap();
        let many = Cabinet::create(2, &params(24.0, 36.0, 12.0, count + more)).unwrap();
        let (before, after) = (aluminum_frame_cost(&few, &rates), aluminum_frame_cost(&many, &rates));
        prop_assert!(after.shelves >= before.shelves);
        prop_assert!(after.total >= before.total);
    }

    #[test]
    fn resizing_to_current_dimensions_changes_nothing(
        w in 6.0f64..60.0,
        h in 6.0f64..96.0,
        d in 6.0f64..30.0,
        shelves in 0i64..10,
        open in any::<bool>(),
    ) {
        let mut cab = Cabinet::create(3, &params(w, h, d, 2)).unwrap();
        cab.set_shelf_count(shelves);
        cab.set_color("Dark Blue");
        cab.set_position(Point3::new(-1.5, 2.0, 0.25));
        cab.set_rotation(Euler::new(0.0, 1.25, 0.0));
        cab.set_door_open(open);
        cab.step_door();

        let before = cab.clone();
        let (cw, ch, cd) = (cab.width_in(), cab.height_in(), cab.depth_in());
        cab.set_dimensions(Some(cw), Some(ch), Some(cd)).unwrap();

        prop_assert_eq!(cab.params(), before.params());
        prop_assert_eq!(cab.shelves(), before.shelves());
        prop_assert_eq!(cab.door(), before.door());
        prop_assert_eq!(cab.position(), before.position());
        prop_assert_eq!(cab.rotation(), before.rotation());
        prop_assert_eq!(cab.is_hollow(), before.is_hollow());
    }
}
