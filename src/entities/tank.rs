use cgmath::{Deg, Quaternion, Rotation3, Vector3};
use futures::FutureExt;
use instant::Duration;

use crate::{
    assets::AssetCache,
    entity::{Entity, LoadFuture, Part, Transform, Visual},
};

const HULL: usize = 0;
const TURRET: usize = 1;
const BARREL: usize = 2;

/// The player's tank. Without input it idles by slowly sweeping its turret.
pub struct PlayerTank {
    position: Vector3<f32>,
    /// Turret heading in degrees.
    heading: f32,
    /// Degrees per second.
    turret_speed: f32,
    visual: Option<Visual>,
}

impl PlayerTank {
    pub const DEFAULT_TURRET_SPEED: f32 = 30.0;

    pub fn new(position: Vector3<f32>) -> Self {
        Self {
            position,
            heading: 0.0,
            turret_speed: Self::DEFAULT_TURRET_SPEED,
            visual: None,
        }
    }

    pub fn with_turret_speed(mut self, degrees_per_second: f32) -> Self {
        self.turret_speed = degrees_per_second;
        self
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    fn apply_heading(&mut self) {
        let rotation = Quaternion::from_angle_y(Deg(self.heading));
        let Some(visual) = self.visual.as_mut() else {
            return;
        };
        visual.parts[TURRET].rotation = rotation;
        // the barrel sticks out of the turret, so it orbits the turret centre
        let turret = visual.parts[TURRET].offset;
        visual.parts[BARREL].offset = turret + rotation * Vector3::new(0.0, 0.0, 0.9);
        visual.parts[BARREL].rotation = rotation;
    }
}

impl Entity for PlayerTank {
    fn name(&self) -> &str {
        "player tank"
    }

    fn load<'a>(&'a mut self, _: &'a AssetCache) -> LoadFuture<'a> {
        async move {
            let mut visual = Visual::new("player tank", Transform::at(self.position));
            let mut parts = vec![
                Part::new(Vector3::new(0.0, 0.25, 0.0), Vector3::new(1.2, 0.5, 1.6)),
                Part::new(Vector3::new(0.0, 0.7, 0.0), Vector3::new(0.8, 0.4, 0.8)),
                Part::new(Vector3::new(0.0, 0.7, 0.9), Vector3::new(0.15, 0.15, 1.0)),
            ];
            parts[HULL].colour = [0.25, 0.4, 0.2, 1.0];
            parts[TURRET].colour = [0.3, 0.45, 0.25, 1.0];
            parts[BARREL].colour = [0.15, 0.15, 0.15, 1.0];
            visual.parts = parts;
            self.visual = Some(visual);
            self.apply_heading();
            Ok::<_, crate::error::LoadError>(())
        }
        .boxed_local()
    }

    fn update(&mut self, dt: Duration) {
        self.heading = (self.heading + self.turret_speed * dt.as_secs_f32()).rem_euclid(360.0);
        self.apply_heading();
    }

    fn visual(&self) -> Option<&Visual> {
        self.visual.as_ref()
    }
}
