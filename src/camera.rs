use std::path::Path;

use glam::{Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::xml::{self, Element};

/// Physical sensor width in metres (full-frame 36mm).
pub const SENSOR_WIDTH: f32 = 0.036;

/// Near/far clip distances handed to the renderer.
pub const DEFAULT_DEPTH_RANGE: Vec2 = Vec2::new(0.0, 100_000.0);

/// One `<camera>` entry of the camera set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    /// Position of the element in the source document.
    pub index: usize,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub focal_length: f32,
    pub focus_distance: f32,
    pub aperture: f32,
    pub sensor_size: Vec2,
    pub depth_range: Vec2,
}

/// Sensor dimensions matching the aspect ratio of the output resolution.
pub fn sensor_size(width: usize, height: usize) -> Vec2 {
    let sensor_height = height as f32 / width as f32 * SENSOR_WIDTH;
    Vec2::new(SENSOR_WIDTH, sensor_height)
}

/// Loads every `<camera>` under the `<cam_list>` root in document order.
pub fn load_cameras(
    path: &Path,
    width: usize,
    height: usize,
) -> Result<Vec<CameraRecord>, LoadError> {
    let text = xml::read_text(path)?;
    let document = xml::parse(path, &text)?;
    let root = xml::root(&document, path, "cam_list")?;
    let sensor = sensor_size(width, height);

    let cameras = xml::children(root, "camera")
        .enumerate()
        .map(|(index, node)| parse_camera(&Element::new(node, path), index, sensor))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("loaded {} camera(s) from {}", cameras.len(), path.display());
    Ok(cameras)
}

fn parse_camera(
    element: &Element<'_, '_, '_>,
    index: usize,
    sensor_size: Vec2,
) -> Result<CameraRecord, LoadError> {
    let mut up = element.vec3_or_zero("upx", "upy", "upz")?;
    if up.length_squared() == 0.0 {
        up = Vec3::Y;
    }

    Ok(CameraRecord {
        index,
        eye: element.vec3_or_zero("cpx", "cpy", "cpz")?,
        target: element.vec3_or_zero("tpx", "tpy", "tpz")?,
        up,
        focal_length: element.f32_or_zero("focal_length")?,
        focus_distance: element.f32_or_zero("focus_dist")?,
        aperture: element.f32_or_zero("aperture")?,
        sensor_size,
        depth_range: DEFAULT_DEPTH_RANGE,
    })
}
