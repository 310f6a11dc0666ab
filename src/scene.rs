//! What a single frame hands to the renderer.

use crate::{config::LightConfig, entity::Visual};

/// Sky/ground light that shades every surface by how much it faces up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: [f32; 3],
    pub ground: [f32; 3],
    pub intensity: f32,
}

impl HemisphereLight {
    pub fn from_hex(sky: u32, ground: u32, intensity: f32) -> Self {
        Self {
            sky: rgb(sky),
            ground: rgb(ground),
            intensity,
        }
    }
}

impl From<&LightConfig> for HemisphereLight {
    fn from(config: &LightConfig) -> Self {
        Self::from_hex(config.sky, config.ground, config.intensity)
    }
}

fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Everything drawn in one frame: the entity visuals in composition order plus
/// the scene light.
#[derive(Debug, Default)]
pub struct Scene<'a> {
    pub visuals: Vec<&'a Visual>,
    pub light: Option<&'a HemisphereLight>,
}

impl Scene<'_> {
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Number of parts over all visuals.
    pub fn part_count(&self) -> usize {
        self.visuals.iter().map(|visual| visual.parts.len()).sum()
    }
}
