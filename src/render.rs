use std::path::PathBuf;

use anyhow::Result;

use crate::params::RenderParams;

/// Renderer buffers written to disk for each camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputInfo {
    pub name: &'static str,
    /// Either 1 or 3.
    pub channels: u32,
    /// Only the colour buffer is gamma corrected.
    pub gamma_corrected: bool,
}

/// Outputs saved once per camera after the first pass.
pub const SINGLE_PASS_OUTPUTS: [OutputInfo; 2] = [
    OutputInfo {
        name: "view_shading_normal",
        channels: 3,
        gamma_corrected: false,
    },
    OutputInfo {
        name: "view_shading_depth",
        channels: 1,
        gamma_corrected: false,
    },
];

/// Outputs saved at every scheduled sample count.
pub const PER_SPP_OUTPUTS: [OutputInfo; 3] = [
    OutputInfo {
        name: "color",
        channels: 3,
        gamma_corrected: true,
    },
    OutputInfo {
        name: "albedo",
        channels: 3,
        gamma_corrected: false,
    },
    OutputInfo {
        name: "gloss",
        channels: 1,
        gamma_corrected: false,
    },
];

/// File name of a single-pass output.
pub fn single_pass_file_name(camera_idx: i64, output: &OutputInfo) -> String {
    format!("cam_{camera_idx}_{}.bin", output.name)
}

/// File name of an output captured at `spp` samples.
pub fn per_spp_file_name(camera_idx: i64, output: &OutputInfo, spp: u32) -> String {
    format!("cam_{camera_idx}_{}_spp_{spp}.bin", output.name)
}

/// Summary of a finished submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderResult {
    pub cameras: usize,
    /// Files produced (or planned) in the output directory.
    pub outputs: Vec<PathBuf>,
}

/// Rendering engine fed with a loaded dataset.
pub trait Renderer<S> {
    fn submit(&mut self, params: &RenderParams<'_, S>) -> Result<RenderResult>;
}
