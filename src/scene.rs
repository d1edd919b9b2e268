use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Material library name expected next to the scene file.
pub const MATERIALS_FILE: &str = "materials.xml";
/// Material-to-mesh mapping name expected next to the scene file.
pub const MAPPING_FILE: &str = "mapping.xml";

/// Scene file plus everything an importer needs to resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSource {
    pub scene_file: PathBuf,
    /// Directory of the scene file, always terminated by one separator.
    pub base_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<MaterialOverride>,
}

/// Material files that replace the materials shipped with the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialOverride {
    pub materials_file: PathBuf,
    pub mapping_file: PathBuf,
}

impl SceneSource {
    /// Resolves the base directory and material override of `scene_file`.
    ///
    /// The override is only picked up when both `materials.xml` and
    /// `mapping.xml` exist; otherwise the scene keeps its own materials.
    pub fn resolve(scene_file: &Path) -> Result<Self, LoadError> {
        if !scene_file.exists() {
            return Err(LoadError::FileNotFound(scene_file.to_path_buf()));
        }

        let parent = scene_file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let base_dir = with_trailing_separator(&parent.to_string_lossy());

        let materials_file = parent.join(MATERIALS_FILE);
        let mapping_file = parent.join(MAPPING_FILE);
        let materials = if materials_file.exists() && mapping_file.exists() {
            debug!(
                "using material override {} / {}",
                materials_file.display(),
                mapping_file.display()
            );
            Some(MaterialOverride {
                materials_file,
                mapping_file,
            })
        } else {
            warn!("{MATERIALS_FILE} or {MAPPING_FILE} is missing; keeping scene materials");
            None
        };

        Ok(Self {
            scene_file: scene_file.to_path_buf(),
            base_dir,
            materials,
        })
    }
}

fn with_trailing_separator(dir: &str) -> String {
    let mut dir = dir.to_string();
    if !dir.ends_with('/') && !dir.ends_with('\\') {
        dir.push(MAIN_SEPARATOR);
    }
    dir
}

/// Scene and material loading backend.
///
/// Implementations own the mesh/material formats; the loader only hands over
/// resolved paths.
pub trait SceneImporter {
    type Scene;

    fn import(&mut self, source: &SceneSource) -> Result<Self::Scene>;

    fn apply_materials(
        &mut self,
        scene: &mut Self::Scene,
        overrides: &MaterialOverride,
    ) -> Result<()>;
}

/// Importer that defers mesh loading to the render process and keeps the
/// resolved [`SceneSource`] as the scene handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorImporter;

impl SceneImporter for DescriptorImporter {
    type Scene = SceneSource;

    fn import(&mut self, source: &SceneSource) -> Result<SceneSource> {
        Ok(source.clone())
    }

    fn apply_materials(
        &mut self,
        scene: &mut SceneSource,
        overrides: &MaterialOverride,
    ) -> Result<()> {
        scene.materials = Some(overrides.clone());
        Ok(())
    }
}

/// Resolves `scene_file` and runs it through `importer`.
pub fn load_scene<I: SceneImporter>(
    scene_file: &Path,
    importer: &mut I,
) -> Result<(SceneSource, I::Scene), LoadError> {
    let source = SceneSource::resolve(scene_file)?;
    let wrap = |err: anyhow::Error| LoadError::Scene {
        path: scene_file.to_path_buf(),
        source: err.into(),
    };

    let mut scene = importer.import(&source).map_err(wrap)?;
    if let Some(overrides) = &source.materials {
        importer
            .apply_materials(&mut scene, overrides)
            .map_err(wrap)?;
    }
    Ok((source, scene))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::fs;
    use tempfile::TempDir;

    fn scene_dir() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let scene = dir.path().join("scene.obj");
        fs::write(&scene, "v 0 0 0\n").unwrap();
        (dir, scene)
    }

    #[test]
    fn separator_is_appended_once() {
        assert_eq!(with_trailing_separator("assets"), format!("assets{MAIN_SEPARATOR}"));
        assert_eq!(with_trailing_separator("assets/"), "assets/");
        assert_eq!(with_trailing_separator("assets\\"), "assets\\");
    }

    #[test]
    fn base_dir_is_scene_parent() {
        let (dir, scene) = scene_dir();
        let source = SceneSource::resolve(&scene).unwrap();
        assert_eq!(
            source.base_dir,
            format!("{}{MAIN_SEPARATOR}", dir.path().display())
        );
        assert!(source.materials.is_none());
    }

    #[test]
    fn material_override_requires_both_files() {
        let (dir, scene) = scene_dir();
        fs::write(dir.path().join(MATERIALS_FILE), "<materials/>").unwrap();
        assert!(SceneSource::resolve(&scene).unwrap().materials.is_none());

        fs::write(dir.path().join(MAPPING_FILE), "<mapping/>").unwrap();
        let source = SceneSource::resolve(&scene).unwrap();
        assert_eq!(
            source.materials,
            Some(MaterialOverride {
                materials_file: dir.path().join(MATERIALS_FILE),
                mapping_file: dir.path().join(MAPPING_FILE),
            })
        );
    }

    #[test]
    fn missing_scene_is_reported() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            SceneSource::resolve(&dir.path().join("none.obj")),
            Err(LoadError::FileNotFound(_))
        ));
    }

    #[derive(Default)]
    struct RecordingImporter {
        overrides_applied: usize,
        fail: bool,
    }

    impl SceneImporter for RecordingImporter {
        type Scene = String;

        fn import(&mut self, source: &SceneSource) -> Result<String> {
            if self.fail {
                return Err(anyhow!("unsupported mesh format"));
            }
            Ok(source.scene_file.display().to_string())
        }

        fn apply_materials(&mut self, _: &mut String, _: &MaterialOverride) -> Result<()> {
            self.overrides_applied += 1;
            Ok(())
        }
    }

    #[test]
    fn importer_applies_overrides_only_when_present() {
        let (dir, scene) = scene_dir();
        let mut importer = RecordingImporter::default();
        load_scene(&scene, &mut importer).unwrap();
        assert_eq!(importer.overrides_applied, 0);

        fs::write(dir.path().join(MATERIALS_FILE), "").unwrap();
        fs::write(dir.path().join(MAPPING_FILE), "").unwrap();
        let (_, handle) = load_scene(&scene, &mut importer).unwrap();
        assert_eq!(importer.overrides_applied, 1);
        assert_eq!(handle, scene.display().to_string());
    }

    #[test]
    fn importer_failure_becomes_scene_error() {
        let (_dir, scene) = scene_dir();
        let mut importer = RecordingImporter {
            fail: true,
            ..RecordingImporter::default()
        };
        let err = load_scene(&scene, &mut importer).unwrap_err();
        assert!(matches!(err, LoadError::Scene { .. }));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "unsupported mesh format");
    }
}
