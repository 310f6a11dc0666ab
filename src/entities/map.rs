use cgmath::Vector3;
use futures::FutureExt;
use instant::Duration;

use crate::{
    assets::AssetCache,
    entity::{Entity, LoadFuture, Part, Transform, Visual},
    error::LoadError,
};

const TILE_HEIGHT: f32 = 0.2;

/// Square ground of `size × size` unit tiles centred on `origin`, each tile
/// showing a randomly picked ground texture.
pub struct GameMap {
    origin: Vector3<f32>,
    size: u32,
    visual: Option<Visual>,
}

impl GameMap {
    pub fn new(origin: Vector3<f32>, size: u32) -> Self {
        Self {
            origin,
            size,
            visual: None,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    fn build(&self, assets: &AssetCache) -> Result<Visual, LoadError> {
        let mut visual = Visual::new("map", Transform::at(self.origin));
        let half = (self.size as f32 - 1.0) / 2.0;
        for x in 0..self.size {
            for z in 0..self.size {
                let offset = Vector3::new(x as f32 - half, -TILE_HEIGHT / 2.0, z as f32 - half);
                let tile = Part::new(offset, Vector3::new(1.0, TILE_HEIGHT, 1.0))
                    .with_texture(assets.random_texture()?);
                visual.push(tile);
            }
        }
        Ok(visual)
    }
}

impl Entity for GameMap {
    fn name(&self) -> &str {
        "map"
    }

    fn load<'a>(&'a mut self, assets: &'a AssetCache) -> LoadFuture<'a> {
        async move {
            self.visual = Some(self.build(assets)?);
            Ok::<_, LoadError>(())
        }
        .boxed_local()
    }

    fn update(&mut self, _: Duration) {}

    fn visual(&self) -> Option<&Visual> {
        self.visual.as_ref()
    }
}
