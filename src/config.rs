//! Scene configuration.
//!
//! Everything the core treats as data rather than logic lives here: where the
//! render surface is attached, where assets come from, which textures make up the
//! ground set, the camera and the fixed scene light. All fields have defaults so a
//! RON file only needs to name what it overrides.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Id of the host element the surface is appended to (web only).
    pub attach_target: String,
    /// Content root all asset paths are relative to.
    pub asset_root: String,
    pub textures: TextureManifest,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub clear_colour: [f64; 4],
    pub window_title: String,
    pub map_size: u32,
    pub tank_position: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            attach_target: "app".to_string(),
            asset_root: "assets".to_string(),
            textures: TextureManifest::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            clear_colour: [0.0, 0.0, 0.0, 0.0],
            window_title: "tank-scene".to_string(),
            map_size: 15,
            tank_position: [7.0, 7.0, 0.0],
        }
    }
}

impl SceneConfig {
    /// Parse and validate a config.
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scene cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron(&source)
    }
}

/// The fixed, named set of textures the asset cache loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureManifest {
    pub dir: String,
    pub names: Vec<String>,
}

impl TextureManifest {
    pub fn new(dir: impl Into<String>, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            dir: dir.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Storage paths in manifest order, e.g. `textures/g1.png`.
    pub fn paths(&self) -> impl Iterator<Item = String> + '_ {
        self.names.iter().map(|name| {
            if self.dir.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", self.dir.trim_end_matches('/'), name)
            }
        })
    }
}

impl Default for TextureManifest {
    fn default() -> Self {
        Self::new("textures", (1..=8).map(|i| format!("g{i}.png")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub direction: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            position: [7.0, 7.0, 15.0],
            direction: [0.0, 0.0, -1.0],
        }
    }
}

impl CameraConfig {
    /// The projection needs `0 < near < far` and a field of view in `(0, 180)`
    /// degrees, the view a direction of non-zero length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return invalid("camera.fov_degrees", "must lie strictly between 0 and 180");
        }
        if !(self.near > 0.0 && self.near.is_finite()) {
            return invalid("camera.near", "must be positive");
        }
        if !(self.far > self.near && self.far.is_finite()) {
            return invalid("camera.far", "must be greater than camera.near");
        }
        if !self.direction.iter().all(|c| c.is_finite())
            || self.direction.iter().all(|c| *c == 0.0)
        {
            return invalid("camera.direction", "must be a finite, non-zero vector");
        }
        Ok(())
    }
}

/// Hemisphere light colours as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub sky: u32,
    pub ground: u32,
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            sky: 0xffffbb,
            ground: 0x080820,
            intensity: 1.0,
        }
    }
}
