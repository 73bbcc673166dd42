//! Snapshot export.
//!
//! Renders a front elevation of the design (looking down -Z) into an
//! image buffer using tiny-skia, then encodes it as PNG. Rotation is not
//! applied; every cabinet is drawn as its unrotated front face.

use std::io::Cursor;
use std::path::Path;

use chrono::{DateTime, Utc};
use image::{ImageFormat, Rgb, RgbImage};
use thiserror::Error;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::model::Cabinet;
use crate::room::RoomContext;

/// Default stem for exported file names
pub const DEFAULT_FILE_STEM: &str = "cabinet-design";

/// Snapshot export error type
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The requested canvas has no pixels
    #[error("Cannot render a {width}x{height} snapshot")]
    EmptyCanvas { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output size for snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotOptions {
    pub width: u32,
    pub height: u32,
    /// Blank border around the drawing, in pixels
    pub margin: f32,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            margin: 32.0,
        }
    }
}

fn bg_color() -> Color {
    Color::from_rgba8(240, 240, 240, 255)
}
fn floor_color() -> Color {
    Color::from_rgba8(120, 113, 108, 255)
}
fn room_color() -> Color {
    Color::from_rgba8(168, 162, 158, 255)
}
fn photo_color() -> Color {
    Color::from_rgba8(214, 211, 209, 255)
}
fn rgb_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgba8(r, g, b, 255)
}

/// World-space extents of the drawing.
#[derive(Debug, Clone, Copy)]
struct Extents {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Extents {
    fn include(&mut self, left: f64, bottom: f64, right: f64, top: f64) {
        self.min_x = self.min_x.min(left);
        self.max_x = self.max_x.max(right);
        self.min_y = self.min_y.min(bottom);
        self.max_y = self.max_y.max(top);
    }
}

fn extents(cabinets: &[Cabinet], room: &RoomContext) -> Extents {
    // always show a little floor around the origin
    let mut ext = Extents {
        min_x: -1.0,
        max_x: 1.0,
        min_y: 0.0,
        max_y: 1.0,
    };
    for cabinet in cabinets {
        let body = cabinet.body_size();
        let p = cabinet.position();
        ext.include(
            p.x - body.width / 2.0,
            p.y - body.height / 2.0,
            p.x + body.width / 2.0,
            p.y + body.height / 2.0,
        );
    }
    if let Some(bounds) = room.room_bounds() {
        ext.include(bounds.min().x, bounds.min().y, bounds.max().x, bounds.max().y);
    }
    if let Some(photo) = room.photo() {
        let (w, h) = photo.plane_size();
        ext.include(-w / 2.0, 0.0, w / 2.0, h);
    }
    ext
}

/// Maps world coordinates (y up) onto pixels (y down).
fn view_transform(ext: &Extents, options: &SnapshotOptions) -> Transform {
    let avail_w = (options.width as f32 - 2.0 * options.margin).max(1.0);
    let avail_h = (options.height as f32 - 2.0 * options.margin).max(1.0);
    let span_x = (ext.max_x - ext.min_x).max(f64::EPSILON) as f32;
    let span_y = (ext.max_y - ext.min_y).max(f64::EPSILON) as f32;
    let scale = (avail_w / span_x).min(avail_h / span_y);

    // center the drawing in the available area
    let pad_x = options.margin + (avail_w - span_x * scale) / 2.0;
    let pad_y = options.margin + (avail_h - span_y * scale) / 2.0;

    Transform::from_translate(-(ext.min_x as f32), -(ext.max_y as f32))
        .post_scale(scale, -scale)
        .post_translate(pad_x, pad_y)
}

fn world_rect(left: f64, bottom: f64, right: f64, top: f64) -> Option<Rect> {
    Rect::from_ltrb(
        left.min(right) as f32,
        bottom.min(top) as f32,
        left.max(right) as f32,
        bottom.max(top) as f32,
    )
}

fn fill_rect(pixmap: &mut Pixmap, rect: Option<Rect>, color: Color, transform: Transform) {
    if let Some(r) = rect {
        let mut paint = Paint::default();
        paint.set_color(color);
        pixmap.fill_path(&PathBuilder::from_rect(r), &paint, FillRule::Winding, transform, None);
    }
}

fn stroke_rect(pixmap: &mut Pixmap, rect: Option<Rect>, color: Color, width: f32, transform: Transform) {
    if let Some(r) = rect {
        let mut paint = Paint::default();
        paint.set_color(color);
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        pixmap.stroke_path(&PathBuilder::from_rect(r), &paint, &stroke, transform, None);
    }
}

fn draw_cabinet(pixmap: &mut Pixmap, cabinet: &Cabinet, transform: Transform, line: f32) {
    let geo = cabinet.geometry();
    let p = cabinet.position();
    let body = world_rect(
        p.x - geo.body.width / 2.0,
        p.y - geo.body.height / 2.0,
        p.x + geo.body.width / 2.0,
        p.y + geo.body.height / 2.0,
    );
    let body_color = rgb_color(cabinet.color().body_rgb());
    let shelf_color = rgb_color(cabinet.color().shelf_rgb());

    if cabinet.is_hollow() {
        stroke_rect(pixmap, body, body_color, line * 2.0, transform);
    } else {
        fill_rect(pixmap, body, body_color, transform);
        stroke_rect(pixmap, body, shelf_color, line, transform);
    }

    // shelves show through an open (or swinging) door and in the open view
    if cabinet.is_hollow() || geo.door.angle != 0.0 {
        for shelf in geo.shelves {
            let y = p.y + shelf.y;
            fill_rect(
                pixmap,
                world_rect(
                    p.x - shelf.width / 2.0,
                    y - shelf.thickness / 2.0,
                    p.x + shelf.width / 2.0,
                    y + shelf.thickness / 2.0,
                ),
                shelf_color,
                transform,
            );
        }
    }

    // the door swings about its hinge; seen from the front only its
    // projected width changes
    let door = geo.door;
    let hinge_x = p.x + door.hinge.x;
    let reach = door.width * door.angle.cos();
    let door_rect = world_rect(
        hinge_x,
        p.y - door.height / 2.0,
        hinge_x + reach,
        p.y + door.height / 2.0,
    );
    fill_rect(pixmap, door_rect, body_color, transform);
    stroke_rect(pixmap, door_rect, shelf_color, line, transform);
}

/// Renders a front elevation of the design.
pub fn render_elevation(
    cabinets: &[Cabinet],
    room: &RoomContext,
    options: &SnapshotOptions,
) -> Result<RgbImage, SnapshotError> {
    let (width, height) = (options.width, options.height);
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return Err(SnapshotError::EmptyCanvas { width, height });
    };
    pixmap.fill(bg_color());

    let ext = extents(cabinets, room);
    let transform = view_transform(&ext, options);
    // one pixel, in world units
    let line = 1.0 / transform.sy.abs().max(f32::EPSILON);

    if let Some(photo) = room.photo() {
        let (w, h) = photo.plane_size();
        fill_rect(&mut pixmap, world_rect(-w / 2.0, 0.0, w / 2.0, h), photo_color(), transform);
    }
    if let Some(bounds) = room.room_bounds() {
        stroke_rect(
            &mut pixmap,
            world_rect(bounds.min().x, 0.0, bounds.max().x, bounds.height),
            room_color(),
            line * 2.0,
            transform,
        );
    }
    fill_rect(
        &mut pixmap,
        world_rect(ext.min_x, -line as f64 * 2.0, ext.max_x, 0.0),
        floor_color(),
        transform,
    );

    // back to front
    let mut order: Vec<&Cabinet> = cabinets.iter().collect();
    order.sort_by(|a, b| a.position().z.total_cmp(&b.position().z));
    for cabinet in order {
        draw_cabinet(&mut pixmap, cabinet, transform, line);
    }

    let data = pixmap.data();
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let idx = pixel_offset(x, y, width);
        // every paint is opaque, so premultiplied and straight rgb agree
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    }))
}

/// Byte offset of an RGBA pixel in a row-major buffer.
fn pixel_offset(x: u32, y: u32, width: u32) -> usize {
    (y as usize * width as usize + x as usize) * 4
}

/// Encodes an image as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, SnapshotError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Renders and writes a PNG snapshot.
pub fn save_snapshot(
    path: impl AsRef<Path>,
    cabinets: &[Cabinet],
    room: &RoomContext,
    options: &SnapshotOptions,
) -> Result<(), SnapshotError> {
    let image = render_elevation(cabinets, room, options)?;
    std::fs::write(path.as_ref(), encode_png(&image)?)?;
    tracing::info!(
        "Exported {}x{} snapshot to {}",
        options.width,
        options.height,
        path.as_ref().display()
    );
    Ok(())
}

/// `<stem>-<unix millis>.<extension>`
pub fn timestamped_file_name(stem: &str, at: DateTime<Utc>, extension: &str) -> String {
    format!("{}-{}.{}", stem, at.timestamp_millis(), extension)
}

/// Name for a design saved under `stem`.
pub fn design_file_name(stem: &str, at: DateTime<Utc>) -> String {
    timestamped_file_name(stem, at, "json")
}

/// Name for a snapshot exported under `stem`.
pub fn snapshot_file_name(stem: &str, at: DateTime<Utc>) -> String {
    timestamped_file_name(stem, at, "png")
}
