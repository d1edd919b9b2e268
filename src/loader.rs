use log::info;

use crate::camera::{self, CameraRecord};
use crate::config::AppConfig;
use crate::error::LoadError;
use crate::light::{self, LightRecord};
use crate::params::RenderParams;
use crate::scene::{self, SceneImporter, SceneSource};
use crate::shard;
use crate::spp;

/// Validated configuration together with everything loaded from it.
///
/// Construction either loads every input or fails; the collections are never
/// modified afterwards.
#[derive(Debug)]
pub struct DatasetLoader<S> {
    config: AppConfig,
    cameras: Vec<CameraRecord>,
    lights: Vec<LightRecord>,
    spp: Vec<u32>,
    source: SceneSource,
    scene: S,
}

impl<S> DatasetLoader<S> {
    /// Validates `config`, loads the camera shard, lights, spp list and scene.
    pub fn load<I>(config: AppConfig, importer: &mut I) -> Result<Self, LoadError>
    where
        I: SceneImporter<Scene = S>,
    {
        config.validate()?;

        let all_cameras = camera::load_cameras(&config.camera_file, config.width, config.height)?;
        let cameras = shard::split_by_index(&all_cameras, config.split_num, config.split_idx)?
            .to_vec();
        let lights = light::load_lights(&config.light_file)?;
        let spp = spp::load_spp(&config.spp_file)?;
        let (source, scene) = scene::load_scene(&config.scene_file, importer)?;

        info!(
            "loaded {} of {} camera(s) (shard {}/{}), {} light(s), {} spp value(s)",
            cameras.len(),
            all_cameras.len(),
            config.split_idx,
            config.split_num,
            lights.len(),
            spp.len()
        );

        Ok(Self {
            config,
            cameras,
            lights,
            spp,
            source,
            scene,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Cameras assigned to this shard.
    pub fn cameras(&self) -> &[CameraRecord] {
        &self.cameras
    }

    pub fn lights(&self) -> &[LightRecord] {
        &self.lights
    }

    pub fn spp(&self) -> &[u32] {
        &self.spp
    }

    pub fn scene_source(&self) -> &SceneSource {
        &self.source
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Parameter block handed to the renderer.
    pub fn render_params(&self) -> RenderParams<'_, S> {
        // validate() guarantees both dimensions fit in u32
        RenderParams {
            output_dir: &self.config.output_dir,
            scene_file: &self.config.scene_file,
            scene: &self.scene,
            cameras: &self.cameras,
            cameras_index_offset: self.config.offset_idx,
            lights: &self.lights,
            spp: &self.spp,
            width: self.config.width as u32,
            height: self.config.height as u32,
            num_bounces: self.config.num_bounces,
            device_idx: self.config.device_idx,
            gamma_correction: self.config.gamma_correction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::LightKind;
    use crate::scene::DescriptorImporter;
    use glam::Vec3;
    use once_cell::sync::Lazy;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    static CAMERAS: Lazy<String> = Lazy::new(|| {
        let cameras: String = (0..5)
            .map(|i| format!("  <camera cpx=\"{i}\" cpy=\"0\" cpz=\"0\" tpz=\"-1\"/>\n"))
            .collect();
        format!("<cam_list>\n{cameras}</cam_list>\n")
    });

    const LIGHTS: &str = r#"<light_list><light type="point" posy="4" radx="1" rady="1" radz="1"/></light_list>"#;
    const SPP: &str = r#"<spp_list><spp iter_num="8"/><spp iter_num="2"/></spp_list>"#;

    fn write_inputs(root: &Path, cameras: &str) -> AppConfig {
        fs::write(root.join("cameras.xml"), cameras).unwrap();
        fs::write(root.join("lights.xml"), LIGHTS).unwrap();
        fs::write(root.join("spp.xml"), SPP).unwrap();
        fs::write(root.join("scene.obj"), "v 0 0 0\n").unwrap();
        let output_dir = root.join("out");
        fs::create_dir_all(&output_dir).unwrap();
        AppConfig {
            scene_file: root.join("scene.obj"),
            light_file: root.join("lights.xml"),
            camera_file: root.join("cameras.xml"),
            spp_file: root.join("spp.xml"),
            output_dir,
            width: 320,
            height: 240,
            ..AppConfig::default()
        }
    }

    #[test]
    fn loads_every_input() {
        let dir = TempDir::new().unwrap();
        let config = write_inputs(dir.path(), &CAMERAS);
        let loader = DatasetLoader::load(config, &mut DescriptorImporter).unwrap();

        assert_eq!(loader.cameras().len(), 5);
        assert_eq!(loader.lights().len(), 1);
        assert_eq!(loader.lights()[0].kind(), LightKind::Point);
        assert_eq!(loader.lights()[0].position, Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(loader.spp(), &[8, 2]);
        assert_eq!(loader.scene(), loader.scene_source());
    }

    #[test]
    fn render_params_mirror_config() {
        let dir = TempDir::new().unwrap();
        let mut config = write_inputs(dir.path(), &CAMERAS);
        config.num_bounces = 3;
        config.device_idx = 1;
        config.offset_idx = 10;
        config.gamma_correction = true;
        let loader = DatasetLoader::load(config.clone(), &mut DescriptorImporter).unwrap();

        let params = loader.render_params();
        assert_eq!(params.width, 320);
        assert_eq!(params.height, 240);
        assert_eq!(params.output_dir, config.output_dir.as_path());
        assert_eq!(params.num_bounces, 3);
        assert_eq!(params.device_idx, 1);
        assert!(params.gamma_correction);
        assert_eq!(params.cameras.len(), 5);
        assert_eq!(params.output_index(&params.cameras[2]), 12);
    }

    #[test]
    fn shard_keeps_document_indices() {
        let dir = TempDir::new().unwrap();
        let mut config = write_inputs(dir.path(), &CAMERAS);
        config.split_num = 2;
        config.split_idx = 1;
        let loader = DatasetLoader::load(config, &mut DescriptorImporter).unwrap();

        let indices: Vec<_> = loader.cameras().iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![3, 4]);
        assert_eq!(loader.cameras()[0].eye, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn too_many_shards_fail() {
        let dir = TempDir::new().unwrap();
        let mut config = write_inputs(dir.path(), &CAMERAS);
        config.split_num = 6;
        assert!(matches!(
            DatasetLoader::load(config, &mut DescriptorImporter),
            Err(LoadError::InvalidShardParams { .. })
        ));
    }

    #[test]
    fn empty_camera_list_cannot_be_sharded() {
        let dir = TempDir::new().unwrap();
        let config = write_inputs(dir.path(), "<cam_list/>");
        assert!(matches!(
            DatasetLoader::load(config, &mut DescriptorImporter),
            Err(LoadError::InvalidShardParams { .. })
        ));
    }

    #[test]
    fn invalid_config_stops_before_loading() {
        let dir = TempDir::new().unwrap();
        let mut config = write_inputs(dir.path(), "not even xml");
        config.output_dir = dir.path().join("missing");
        assert!(matches!(
            DatasetLoader::load(config, &mut DescriptorImporter),
            Err(LoadError::NotADirectory(_))
        ));
    }
}
