//! Scene input loading for a path-tracing dataset generator.
//!
//! The crate reads camera, light and samples-per-pixel sets from XML, checks
//! them against the run configuration, and assembles the parameter block a
//! rendering backend consumes.  Rendering itself stays behind the
//! [`Renderer`] and [`SceneImporter`] traits so the loading code remains
//! testable without a GPU.

pub mod camera;
pub mod config;
pub mod error;
pub mod light;
pub mod loader;
pub mod manifest;
pub mod params;
pub mod render;
pub mod scene;
pub mod shard;
pub mod spp;
mod xml;

pub use camera::CameraRecord;
pub use config::AppConfig;
pub use error::LoadError;
pub use light::{LightKind, LightRecord, LightShape};
pub use loader::DatasetLoader;
pub use manifest::ManifestRenderer;
pub use params::RenderParams;
pub use render::{RenderResult, Renderer};
pub use scene::{DescriptorImporter, MaterialOverride, SceneImporter, SceneSource};
