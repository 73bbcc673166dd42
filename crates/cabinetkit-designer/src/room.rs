//! Room context.
//!
//! Optional backdrop for placement: an uploaded room photo shown as a
//! vertical plane behind the cabinets, and a box-shaped 3D room with a
//! configurable ceiling. Placement reads this context to decide where the
//! floor is and how high a cabinet may reach.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cabinetkit_core::units::inches_to_units;
use cabinetkit_core::{Point3, RoomError};

/// Default ceiling height in feet
pub const DEFAULT_CEILING_HEIGHT_FT: f64 = 8.0;
/// 3D room footprint width in feet
pub const ROOM_WIDTH_FT: f64 = 15.0;
/// 3D room footprint depth in feet
pub const ROOM_DEPTH_FT: f64 = 12.0;
/// Width of the photo plane in scene units
pub const PHOTO_PLANE_WIDTH: f64 = 12.0;
/// Z position of the photo plane
pub const PHOTO_PLANE_Z: f64 = -3.0;

/// An uploaded room photo.
///
/// The payload is kept verbatim (it is what the design file stores); only
/// the pixel dimensions are decoded, to size the backdrop plane.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomPhoto {
    payload: String,
    width_px: u32,
    height_px: u32,
    generation: u64,
}

impl RoomPhoto {
    /// Decodes an encoded-image string, either a `data:` URL or bare base64.
    pub fn decode(payload: impl Into<String>) -> Result<Self, RoomError> {
        let payload = payload.into();
        let (width_px, height_px) = decode_dimensions(&payload)?;
        Ok(Self {
            payload,
            width_px,
            height_px,
            generation: 0,
        })
    }

    /// The encoded image exactly as supplied.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Identifies this photo among every photo the context has held.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width_px as f64 / self.height_px as f64
    }

    /// Backdrop plane size (width, height) in scene units.
    pub fn plane_size(&self) -> (f64, f64) {
        (PHOTO_PLANE_WIDTH, PHOTO_PLANE_WIDTH / self.aspect_ratio())
    }
}

fn decode_dimensions(payload: &str) -> Result<(u32, u32), RoomError> {
    let encoded = match payload.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest.split_once(',').ok_or_else(|| RoomError::InvalidPhoto {
                reason: "data URL has no payload".to_string(),
            })?;
            if !header.ends_with(";base64") {
                return Err(RoomError::InvalidPhoto {
                    reason: format!("unsupported data URL encoding '{}'", header),
                });
            }
            data
        }
        None => payload,
    };

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| RoomError::InvalidPhoto {
            reason: e.to_string(),
        })?;

    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| RoomError::InvalidPhoto {
            reason: e.to_string(),
        })?
        .into_dimensions()
        .map_err(|e| RoomError::InvalidPhoto {
            reason: e.to_string(),
        })?;

    if width == 0 || height == 0 {
        return Err(RoomError::InvalidPhoto {
            reason: "image has no pixels".to_string(),
        });
    }
    Ok((width, height))
}

/// Interior extents of the 3D room in scene units.
///
/// The room sits on the floor (y = 0), centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomBounds {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl RoomBounds {
    pub fn min(&self) -> Point3 {
        Point3::new(-self.width / 2.0, 0.0, -self.depth / 2.0)
    }

    pub fn max(&self) -> Point3 {
        Point3::new(self.width / 2.0, self.height, self.depth / 2.0)
    }
}

/// Room photo, ceiling height and 3D room visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomContext {
    photo: Option<RoomPhoto>,
    ceiling_height_ft: f64,
    show_3d_room: bool,
    next_generation: u64,
    released: Vec<u64>,
}

impl Default for RoomContext {
    fn default() -> Self {
        Self {
            photo: None,
            ceiling_height_ft: DEFAULT_CEILING_HEIGHT_FT,
            show_3d_room: false,
            next_generation: 1,
            released: Vec::new(),
        }
    }
}

impl RoomContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with the given ceiling and room visibility.
    pub fn with_ceiling(ceiling_height_ft: f64, show_3d_room: bool) -> Result<Self, RoomError> {
        let mut room = Self::default();
        room.set_ceiling_height(ceiling_height_ft)?;
        room.show_3d_room = show_3d_room;
        Ok(room)
    }

    pub fn photo(&self) -> Option<&RoomPhoto> {
        self.photo.as_ref()
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    /// Decodes and installs a room photo, releasing any previous one.
    /// Returns the new photo's generation. A rejected payload leaves the
    /// current photo in place.
    pub fn attach_photo(&mut self, payload: impl Into<String>) -> Result<u64, RoomError> {
        let photo = RoomPhoto::decode(payload)?;
        Ok(self.install_photo(photo))
    }

    /// Installs an already decoded photo, releasing any previous one.
    pub fn install_photo(&mut self, mut photo: RoomPhoto) -> u64 {
        self.release_photo();
        photo.generation = self.next_generation;
        self.next_generation += 1;
        tracing::info!(
            "Room photo {}x{} attached (generation {})",
            photo.width_px,
            photo.height_px,
            photo.generation
        );
        let generation = photo.generation;
        self.photo = Some(photo);
        generation
    }

    /// Removes the room photo. Returns false when there was none.
    pub fn clear_photo(&mut self) -> bool {
        let had_photo = self.photo.is_some();
        self.release_photo();
        had_photo
    }

    fn release_photo(&mut self) {
        if let Some(old) = self.photo.take() {
            tracing::debug!("Releasing room photo generation {}", old.generation);
            self.released.push(old.generation);
        }
    }

    /// Photo generations released since the last call, oldest first.
    pub fn take_released(&mut self) -> Vec<u64> {
        std::mem::take(&mut self.released)
    }

    pub fn ceiling_height_ft(&self) -> f64 {
        self.ceiling_height_ft
    }

    /// Sets the 3D room's ceiling height in feet.
    pub fn set_ceiling_height(&mut self, feet: f64) -> Result<(), RoomError> {
        if !feet.is_finite() || feet <= 0.0 {
            return Err(RoomError::InvalidCeilingHeight { value: feet });
        }
        self.ceiling_height_ft = feet;
        Ok(())
    }

    /// Ceiling height in scene units (one unit is one foot).
    pub fn ceiling_height_units(&self) -> f64 {
        inches_to_units(self.ceiling_height_ft * 12.0)
    }

    pub fn is_3d_room_shown(&self) -> bool {
        self.show_3d_room
    }

    pub fn set_3d_room_shown(&mut self, shown: bool) {
        self.show_3d_room = shown;
    }

    /// Flips 3D room visibility and returns the new state.
    pub fn toggle_3d_room(&mut self) -> bool {
        self.show_3d_room = !self.show_3d_room;
        self.show_3d_room
    }

    /// Extents of the 3D room, when it is shown.
    pub fn room_bounds(&self) -> Option<RoomBounds> {
        self.show_3d_room.then(|| RoomBounds {
            width: ROOM_WIDTH_FT,
            depth: ROOM_DEPTH_FT,
            height: self.ceiling_height_units(),
        })
    }

    /// Height of the floor under a placement point.
    ///
    /// On the ground plane the hit point already lies on the floor. On the
    /// photo plane the hit is somewhere up the wall, so only its x and z
    /// locate the cabinet and the floor is at zero.
    pub fn floor_under(&self, point: Point3) -> f64 {
        if self.photo.is_some() {
            0.0
        } else {
            point.y
        }
    }

    /// How far the top of a cabinet centered at `center_y` rises above the
    /// ceiling. `None` when the 3D room is hidden or the cabinet fits.
    pub fn ceiling_overflow(&self, center_y: f64, half_height: f64) -> Option<f64> {
        let bounds = self.room_bounds()?;
        let excess = center_y + half_height - bounds.height;
        (excess > 0.0).then_some(excess)
    }
}
