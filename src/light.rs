use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use glam::{Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::xml::{self, Element};

/// Light categories understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightKind {
    Point,
    Spot,
    Directional,
    Environment,
}

impl LightKind {
    /// Name used by the `type` attribute of `<light>`.
    pub const fn as_str(self) -> &'static str {
        match self {
            LightKind::Point => "point",
            LightKind::Spot => "spot",
            LightKind::Directional => "direct",
            LightKind::Environment => "ibl",
        }
    }
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned for `type` values outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported light type '{0}'")]
pub struct UnknownLightKind(pub String);

impl FromStr for LightKind {
    type Err = UnknownLightKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "point" => Ok(LightKind::Point),
            "spot" => Ok(LightKind::Spot),
            "direct" => Ok(LightKind::Directional),
            "ibl" => Ok(LightKind::Environment),
            other => Err(UnknownLightKind(other.to_string())),
        }
    }
}

/// Type-specific light parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LightShape {
    Point,
    /// Inner/outer cone angles.
    Spot { cone: Vec2 },
    Directional,
    /// Image based light; `texture` is resolved and known to exist.
    Environment { texture: PathBuf, multiplier: f32 },
}

/// One `<light>` entry of the light set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRecord {
    pub position: Vec3,
    pub direction: Vec3,
    pub radiant_power: Vec3,
    pub shape: LightShape,
}

impl LightRecord {
    pub fn kind(&self) -> LightKind {
        match self.shape {
            LightShape::Point => LightKind::Point,
            LightShape::Spot { .. } => LightKind::Spot,
            LightShape::Directional => LightKind::Directional,
            LightShape::Environment { .. } => LightKind::Environment,
        }
    }
}

/// Loads every `<light>` under the `<light_list>` root in document order.
///
/// Relative environment texture paths are resolved against the directory of
/// the light file.
pub fn load_lights(path: &Path) -> Result<Vec<LightRecord>, LoadError> {
    let text = xml::read_text(path)?;
    let document = xml::parse(path, &text)?;
    let root = xml::root(&document, path, "light_list")?;
    let lights_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let lights = xml::children(root, "light")
        .map(|node| parse_light(&Element::new(node, path), path, lights_dir))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("loaded {} light(s) from {}", lights.len(), path.display());
    Ok(lights)
}

fn parse_light(
    element: &Element<'_, '_, '_>,
    path: &Path,
    lights_dir: &Path,
) -> Result<LightRecord, LoadError> {
    let type_name = element.required_str("type")?;
    let kind = type_name
        .parse::<LightKind>()
        .map_err(|UnknownLightKind(value)| LoadError::UnknownLightType {
            path: path.to_path_buf(),
            value,
        })?;

    let shape = match kind {
        LightKind::Point => LightShape::Point,
        LightKind::Directional => LightShape::Directional,
        LightKind::Spot => LightShape::Spot {
            cone: Vec2::new(element.f32_or_zero("csx")?, element.f32_or_zero("csy")?),
        },
        LightKind::Environment => {
            let multiplier = element.f32_or_zero("mul")?;
            let texture = resolve_texture(lights_dir, element.required_str("tex")?)?;
            LightShape::Environment {
                texture,
                multiplier,
            }
        }
    };

    Ok(LightRecord {
        position: element.vec3_or_zero("posx", "posy", "posz")?,
        direction: element.vec3_or_zero("dirx", "diry", "dirz")?,
        radiant_power: element.vec3_or_zero("radx", "rady", "radz")?,
        shape,
    })
}

fn resolve_texture(lights_dir: &Path, texture: &str) -> Result<PathBuf, LoadError> {
    let texture = Path::new(texture);
    let resolved = if texture.is_relative() {
        lights_dir.join(texture)
    } else {
        texture.to_path_buf()
    };
    if !resolved.exists() {
        return Err(LoadError::FileNotFound(resolved));
    }
    Ok(resolved)
}
