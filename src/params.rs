use std::path::Path;

use crate::camera::CameraRecord;
use crate::light::LightRecord;

/// Flattened view of a loaded dataset, borrowed by the renderer for the
/// duration of one submission.
#[derive(Debug)]
pub struct RenderParams<'a, S> {
    pub output_dir: &'a Path,
    pub scene_file: &'a Path,
    pub scene: &'a S,
    pub cameras: &'a [CameraRecord],
    /// Added to each camera index when outputs are named.
    pub cameras_index_offset: i32,
    pub lights: &'a [LightRecord],
    pub spp: &'a [u32],
    pub width: u32,
    pub height: u32,
    pub num_bounces: u32,
    pub device_idx: u32,
    pub gamma_correction: bool,
}

impl<S> Clone for RenderParams<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for RenderParams<'_, S> {}

impl<S> RenderParams<'_, S> {
    /// Index used in output file names for `camera`.
    pub fn output_index(&self, camera: &CameraRecord) -> i64 {
        camera.index as i64 + i64::from(self.cameras_index_offset)
    }
}
