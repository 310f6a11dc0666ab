//! The entities of the tank arena.

mod map;
mod tank;

pub use map::GameMap;
pub use tank::PlayerTank;

use crate::{config::SceneConfig, entity::Entity};

/// The arena in composition order: the ground first, then the tank on top of it.
pub fn tank_arena(config: &SceneConfig) -> Vec<Box<dyn Entity>> {
    vec![
        Box::new(GameMap::new([0.0, 0.0, 0.0].into(), config.map_size)),
        Box::new(PlayerTank::new(config.tank_position.into())),
    ]
}
