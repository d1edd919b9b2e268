//! Renderer stand-in that lays out the dataset without touching the GPU.
//!
//! [`ManifestRenderer`] plans every output file of a dataset run and records
//! the run settings in `metadata.xml` next to them.

use std::fmt::Write as _;
use std::fs;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};

use crate::params::RenderParams;
use crate::render::{
    per_spp_file_name, single_pass_file_name, OutputInfo, RenderResult, Renderer,
    PER_SPP_OUTPUTS, SINGLE_PASS_OUTPUTS,
};
use crate::spp;

pub const METADATA_FILE: &str = "metadata.xml";

#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestRenderer;

impl ManifestRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Renderer<S> for ManifestRenderer {
    fn submit(&mut self, params: &RenderParams<'_, S>) -> Result<RenderResult> {
        if !params.output_dir.is_dir() {
            return Err(anyhow!(
                "incorrect output directory {}",
                params.output_dir.display()
            ));
        }
        let (Some(first), Some(last)) = (params.cameras.first(), params.cameras.last()) else {
            return Err(anyhow!("camera set is empty"));
        };
        let schedule = spp::schedule(params.spp)?;

        let metadata = metadata_xml(params, first.index, last.index)
            .context("unable to format run metadata")?;
        let metadata_path = params.output_dir.join(METADATA_FILE);
        fs::write(&metadata_path, metadata)
            .with_context(|| format!("unable to write {}", metadata_path.display()))?;

        let per_camera = SINGLE_PASS_OUTPUTS.len() + PER_SPP_OUTPUTS.len() * schedule.len();
        let mut outputs = Vec::with_capacity(params.cameras.len() * per_camera);
        for camera in params.cameras {
            let camera_idx = params.output_index(camera);
            for output in &SINGLE_PASS_OUTPUTS {
                outputs.push(
                    params
                        .output_dir
                        .join(single_pass_file_name(camera_idx, output)),
                );
            }
            for &samples in &schedule {
                for output in &PER_SPP_OUTPUTS {
                    outputs.push(
                        params
                            .output_dir
                            .join(per_spp_file_name(camera_idx, output, samples)),
                    );
                }
            }
            debug!("event=planned camera_idx={camera_idx}");
        }

        info!(
            "planned {} output(s) for {} camera(s) up to {} spp",
            outputs.len(),
            params.cameras.len(),
            schedule.last().copied().unwrap_or_default()
        );
        Ok(RenderResult {
            cameras: params.cameras.len(),
            outputs,
        })
    }
}

fn metadata_xml<S>(
    params: &RenderParams<'_, S>,
    start_idx: usize,
    end_idx: usize,
) -> Result<String, std::fmt::Error> {
    let mut xml = String::new();
    write_metadata(&mut xml, params, start_idx, end_idx)?;
    Ok(xml)
}

fn write_metadata<S>(
    xml: &mut String,
    params: &RenderParams<'_, S>,
    start_idx: usize,
    end_idx: usize,
) -> std::fmt::Result {
    writeln!(xml, "<metadata>")?;
    writeln!(
        xml,
        "    <scene file=\"{}\"/>",
        escape(&params.scene_file.to_string_lossy())
    )?;
    writeln!(
        xml,
        "    <cameras start_idx=\"{start_idx}\" end_idx=\"{end_idx}\" idx_offset=\"{}\"/>",
        params.cameras_index_offset
    )?;
    writeln!(
        xml,
        "    <outputs width=\"{}\" height=\"{}\">",
        params.width, params.height
    )?;
    for output in SINGLE_PASS_OUTPUTS.iter().chain(PER_SPP_OUTPUTS.iter()) {
        write_output(xml, output, params.gamma_correction)?;
    }
    writeln!(xml, "    </outputs>")?;
    writeln!(xml, "    <renderer num_bounces=\"{}\"/>", params.num_bounces)?;
    writeln!(xml, "    <device idx=\"{}\"/>", params.device_idx)?;
    writeln!(xml, "</metadata>")
}

fn write_output(
    xml: &mut String,
    output: &OutputInfo,
    gamma_correction: bool,
) -> std::fmt::Result {
    write!(
        xml,
        "        <output name=\"{}\" type=\"float32\" channels=\"{}\"",
        output.name, output.channels
    )?;
    if output.gamma_corrected {
        write!(xml, " gamma_correction=\"{gamma_correction}\"")?;
    }
    writeln!(xml, "/>")
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
