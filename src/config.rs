use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// User supplied paths and render settings for one generator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub scene_file: PathBuf,
    pub light_file: PathBuf,
    pub camera_file: PathBuf,
    pub spp_file: PathBuf,
    pub output_dir: PathBuf,
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_num_bounces")]
    pub num_bounces: u32,
    #[serde(default)]
    pub device_idx: u32,
    #[serde(default)]
    pub gamma_correction: bool,
    #[serde(default = "default_split_num")]
    pub split_num: usize,
    #[serde(default)]
    pub split_idx: usize,
    /// Added to camera indices when output files are named.
    #[serde(default)]
    pub offset_idx: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scene_file: PathBuf::new(),
            light_file: PathBuf::new(),
            camera_file: PathBuf::new(),
            spp_file: PathBuf::new(),
            output_dir: PathBuf::new(),
            width: 0,
            height: 0,
            num_bounces: default_num_bounces(),
            device_idx: 0,
            gamma_correction: false,
            split_num: default_split_num(),
            split_idx: 0,
            offset_idx: 0,
        }
    }
}

fn default_num_bounces() -> u32 {
    5
}

fn default_split_num() -> usize {
    1
}

impl AppConfig {
    /// Checks that every required path is present, well formed and exists.
    pub fn validate(&self) -> Result<(), LoadError> {
        require_path("camera_file", &self.camera_file)?;
        require_path("light_file", &self.light_file)?;
        require_path("spp_file", &self.spp_file)?;
        require_path("scene_file", &self.scene_file)?;
        require_path("output_dir", &self.output_dir)?;

        require_xml(&self.camera_file)?;
        require_xml(&self.light_file)?;
        require_xml(&self.spp_file)?;

        require_file(&self.camera_file)?;
        require_file(&self.light_file)?;
        require_file(&self.spp_file)?;
        require_file(&self.scene_file)?;

        if !self.output_dir.is_dir() {
            return Err(LoadError::NotADirectory(self.output_dir.clone()));
        }

        self.validate_render_settings()
    }

    fn validate_render_settings(&self) -> Result<(), LoadError> {
        if self.width == 0 || self.height == 0 {
            return Err(LoadError::InvalidParameter(format!(
                "resolution must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if u32::try_from(self.width).is_err() || u32::try_from(self.height).is_err() {
            return Err(LoadError::InvalidParameter(format!(
                "resolution {}x{} exceeds the renderer limits",
                self.width, self.height
            )));
        }
        if self.num_bounces == 0 {
            return Err(LoadError::InvalidParameter(
                "num_bounces must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_path(field: &'static str, path: &Path) -> Result<(), LoadError> {
    if path.as_os_str().is_empty() {
        return Err(LoadError::MissingPath { field });
    }
    Ok(())
}

fn require_xml(path: &Path) -> Result<(), LoadError> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("xml") {
        return Err(LoadError::InvalidExtension {
            path: path.to_path_buf(),
            expected: "xml",
        });
    }
    Ok(())
}

fn require_file(path: &Path) -> Result<(), LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    Ok(())
}
