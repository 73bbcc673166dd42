use serde::{Deserialize, Serialize};

use cabinetkit_core::units::{inches_to_units, validate_dimension};
use cabinetkit_core::{CabinetColor, CabinetError, CabinetType, Euler, Finish, Material, Point3};

use super::shelf::{clamp_shelf_count, layout_shelves, Shelf, MAX_SHELF_COUNT};
use crate::animation::DoorAnimator;
use crate::renderer::SceneChange;

/// Default cabinet width in inches
pub const DEFAULT_WIDTH_IN: f64 = 24.0;
/// Default cabinet height in inches
pub const DEFAULT_HEIGHT_IN: f64 = 36.0;
/// Default cabinet depth in inches
pub const DEFAULT_DEPTH_IN: f64 = 12.0;
/// Default number of shelves
pub const DEFAULT_SHELF_COUNT: u32 = 2;

/// Door panel size as a fraction of the cabinet face
pub const DOOR_FACE_RATIO: f64 = 0.9;
/// Door panel thickness in scene units
pub const DOOR_THICKNESS: f64 = 0.1;

/// Parameters for creating a cabinet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetParams {
    pub width_in: f64,
    pub height_in: f64,
    pub depth_in: f64,
    pub cabinet_type: CabinetType,
    pub color: CabinetColor,
    pub material: Material,
    pub finish: Finish,
    pub shelf_count: u32,
}

impl CabinetParams {
    /// Checks every dimension and the shelf count, reporting the first
    /// value rejected.
    pub fn validate(&self) -> Result<(), CabinetError> {
        validate_dimension("width", self.width_in)?;
        validate_dimension("height", self.height_in)?;
        validate_dimension("depth", self.depth_in)?;
        if self.shelf_count > MAX_SHELF_COUNT {
            return Err(CabinetError::TooManyShelves {
                count: self.shelf_count as i64,
                max: MAX_SHELF_COUNT,
            });
        }
        Ok(())
    }
}

impl Default for CabinetParams {
    fn default() -> Self {
        Self {
            width_in: DEFAULT_WIDTH_IN,
            height_in: DEFAULT_HEIGHT_IN,
            depth_in: DEFAULT_DEPTH_IN,
            cabinet_type: CabinetType::default(),
            color: CabinetColor::default(),
            material: Material::default(),
            finish: Finish::default(),
            shelf_count: DEFAULT_SHELF_COUNT,
        }
    }
}

/// Box dimensions in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Door panel geometry in the cabinet's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorGeometry {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    /// Hinge pivot: left edge of the front face, just proud of it
    pub hinge: Point3,
    /// Offset of the panel center from the hinge along X
    pub panel_offset_x: f64,
    /// Current swing angle about the hinge's Y axis
    pub angle: f64,
}

/// Everything the rendering collaborator needs to build a cabinet.
#[derive(Debug, Clone, PartialEq)]
pub struct CabinetGeometry<'a> {
    pub body: BoxSize,
    pub shelves: &'a [Shelf],
    pub door: DoorGeometry,
}

/// A parametric cabinet.
///
/// Dimensions are the source of truth; shelves and door proportions are
/// derived from them and regenerated wholesale on every dimension change.
/// Mutators return the [`SceneChange`] the rendering side must apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Cabinet {
    id: u64,
    width_in: f64,
    height_in: f64,
    depth_in: f64,
    cabinet_type: CabinetType,
    color: CabinetColor,
    material: Material,
    finish: Finish,
    shelf_count: u32,
    door: DoorAnimator,
    hollow: bool,
    position: Point3,
    rotation: Euler,
    shelves: Vec<Shelf>,
    revision: u64,
}

impl Cabinet {
    /// Creates a cabinet with its door closed and the solid view showing.
    ///
    /// Fails when a dimension is not positive or the shelf count is over
    /// [`MAX_SHELF_COUNT`].
    pub fn create(id: u64, params: &CabinetParams) -> Result<Self, CabinetError> {
        params.validate()?;

        let mut cabinet = Self {
            id,
            width_in: params.width_in,
            height_in: params.height_in,
            depth_in: params.depth_in,
            cabinet_type: params.cabinet_type,
            color: params.color,
            material: params.material,
            finish: params.finish,
            shelf_count: params.shelf_count,
            door: DoorAnimator::new(false),
            hollow: false,
            position: Point3::ORIGIN,
            rotation: Euler::default(),
            shelves: Vec::new(),
            revision: 0,
        };
        cabinet.regenerate();
        Ok(cabinet)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width_in(&self) -> f64 {
        self.width_in
    }

    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    pub fn depth_in(&self) -> f64 {
        self.depth_in
    }

    pub fn cabinet_type(&self) -> CabinetType {
        self.cabinet_type
    }

    pub fn color(&self) -> CabinetColor {
        self.color
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn finish(&self) -> Finish {
        self.finish
    }

    pub fn shelf_count(&self) -> u32 {
        self.shelf_count
    }

    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    pub fn is_hollow(&self) -> bool {
        self.hollow
    }

    pub fn is_door_open(&self) -> bool {
        self.door.is_open()
    }

    pub fn door(&self) -> &DoorAnimator {
        &self.door
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn rotation(&self) -> Euler {
        self.rotation
    }

    /// Number of full geometry regenerations since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current parameters, suitable for recreating an identical cabinet.
    pub fn params(&self) -> CabinetParams {
        CabinetParams {
            width_in: self.width_in,
            height_in: self.height_in,
            depth_in: self.depth_in,
            cabinet_type: self.cabinet_type,
            color: self.color,
            material: self.material,
            finish: self.finish,
            shelf_count: self.shelf_count,
        }
    }

    /// Body size in scene units.
    pub fn body_size(&self) -> BoxSize {
        BoxSize {
            width: inches_to_units(self.width_in),
            height: inches_to_units(self.height_in),
            depth: inches_to_units(self.depth_in),
        }
    }

    /// Derived geometry for the rendering collaborator.
    pub fn geometry(&self) -> CabinetGeometry<'_> {
        let body = self.body_size();
        let door_width = body.width * DOOR_FACE_RATIO;
        CabinetGeometry {
            body,
            shelves: &self.shelves,
            door: DoorGeometry {
                width: door_width,
                height: body.height * DOOR_FACE_RATIO,
                thickness: DOOR_THICKNESS,
                hinge: Point3::new(
                    -body.width / 2.0,
                    0.0,
                    body.depth / 2.0 + DOOR_THICKNESS / 2.0,
                ),
                panel_offset_x: door_width / 2.0,
                angle: self.door.angle(),
            },
        }
    }

    /// Updates whichever dimensions are given and regenerates the geometry.
    ///
    /// All provided values are validated before any is applied, so a
    /// rejected call leaves the cabinet untouched. Placement, appearance,
    /// shelf count, type, door state and the hollow flag survive.
    pub fn set_dimensions(
        &mut self,
        width_in: Option<f64>,
        height_in: Option<f64>,
        depth_in: Option<f64>,
    ) -> Result<SceneChange, CabinetError> {
        let width_in = width_in
            .map(|w| validate_dimension("width", w))
            .transpose()?
            .unwrap_or(self.width_in);
        let height_in = height_in
            .map(|h| validate_dimension("height", h))
            .transpose()?
            .unwrap_or(self.height_in);
        let depth_in = depth_in
            .map(|d| validate_dimension("depth", d))
            .transpose()?
            .unwrap_or(self.depth_in);

        self.width_in = width_in;
        self.height_in = height_in;
        self.depth_in = depth_in;
        self.regenerate();

        tracing::debug!(
            "Cabinet {} resized to {}x{}x{} in (rev {})",
            self.id,
            width_in,
            height_in,
            depth_in,
            self.revision
        );
        Ok(SceneChange::Rebuild(self.id))
    }

    /// Sets the color from a palette key. Unknown keys use the palette default.
    pub fn set_color(&mut self, key: &str) -> SceneChange {
        self.set_color_value(CabinetColor::from_key(key))
    }

    pub fn set_color_value(&mut self, color: CabinetColor) -> SceneChange {
        self.color = color;
        SceneChange::Appearance(self.id)
    }

    /// Sets the material from a selector key. Unknown keys use plywood.
    pub fn set_material(&mut self, key: &str) {
        self.material = Material::from_key(key);
    }

    pub fn set_material_value(&mut self, material: Material) {
        self.material = material;
    }

    /// Sets the finish from a selector key. Unknown keys mean no finish.
    pub fn set_finish(&mut self, key: &str) {
        self.finish = Finish::from_key(key);
    }

    pub fn set_finish_value(&mut self, finish: Finish) {
        self.finish = finish;
    }

    pub fn set_cabinet_type(&mut self, cabinet_type: CabinetType) {
        self.cabinet_type = cabinet_type;
    }

    /// Switches between the solid and the open/wireframe view.
    pub fn set_hollow(&mut self, hollow: bool) -> SceneChange {
        self.hollow = hollow;
        SceneChange::Visibility(self.id)
    }

    /// Sets the shelf count; negative requests clamp to zero.
    pub fn set_shelf_count(&mut self, count: i64) -> SceneChange {
        self.shelf_count = clamp_shelf_count(count);
        self.shelves = self.layout();
        SceneChange::Shelves(self.id)
    }

    /// Opens or closes the door. The swing itself happens on later ticks.
    pub fn set_door_open(&mut self, open: bool) {
        self.door.set_open(open);
    }

    /// Flips the door and returns the new state.
    pub fn toggle_door(&mut self) -> bool {
        self.door.toggle()
    }

    /// Puts the door at rest in the given state with no swing pending.
    pub fn rest_door(&mut self, open: bool) {
        self.door.set_open(open);
        self.door.settle();
    }

    /// Advances the door animation by one tick.
    pub fn step_door(&mut self) -> Option<SceneChange> {
        self.door.step().then_some(SceneChange::Door(self.id))
    }

    pub fn set_position(&mut self, position: Point3) -> SceneChange {
        self.position = position;
        SceneChange::Transform(self.id)
    }

    pub fn set_rotation(&mut self, rotation: Euler) -> SceneChange {
        self.rotation = rotation;
        SceneChange::Transform(self.id)
    }

    /// Half the body height in scene units.
    pub fn half_height_units(&self) -> f64 {
        inches_to_units(self.height_in) / 2.0
    }

    fn layout(&self) -> Vec<Shelf> {
        let body = self.body_size();
        layout_shelves(body.width, body.height, body.depth, self.shelf_count)
    }

    fn regenerate(&mut self) {
        self.shelves = self.layout();
        self.revision += 1;
    }
}
