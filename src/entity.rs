//! The entity contract and the drawable representation entities expose.
//!
//! An entity is anything that takes part in the frame loop: it loads once
//! (asynchronously, possibly reading the shared [`AssetCache`]), is updated every
//! frame with the elapsed wall time, and exposes a [`Visual`] the renderer draws.

use std::sync::Arc;

use cgmath::{One, Quaternion, Vector3};
use futures::future::LocalBoxFuture;
use instant::Duration;

use crate::{
    assets::{AssetCache, Texture},
    error::LoadError,
};

/// Future returned by [`Entity::load`].
///
/// The load phase runs cooperatively on a single thread, so the future does not
/// need to be `Send`.
pub type LoadFuture<'a> = LocalBoxFuture<'a, Result<(), LoadError>>;

/// A unit participating in the frame loop.
///
/// # Lifecycle
///
/// 1. The entity is constructed synchronously with its initial placement.
/// 2. `load()` is awaited exactly once before the first update. It must leave a
///    visual behind; `visual()` returns `None` until then.
/// 3. `update()` is called once per frame, forever.
pub trait Entity {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Build the visual representation.
    ///
    /// Entities are loaded one after another in composition order, so an entity
    /// may rely on everything an earlier one did during its load.
    fn load<'a>(&'a mut self, assets: &'a AssetCache) -> LoadFuture<'a>;

    /// Advance the entity by `dt`.
    ///
    /// Frames are not delivered at a fixed rate, so every change has to be scaled
    /// by `dt`. Must not block or perform I/O.
    fn update(&mut self, dt: Duration);

    fn visual(&self) -> Option<&Visual>;
}

/// Position, rotation and scale of a visual.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            // `Quaternion::one()` is the identity rotation
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// A box-shaped piece of a visual, relative to the visual's transform.
#[derive(Clone, Debug)]
pub struct Part {
    pub offset: Vector3<f32>,
    pub size: Vector3<f32>,
    pub colour: [f32; 4],
    pub texture: Option<Arc<Texture>>,
    /// Local rotation around the part's own centre.
    pub rotation: Quaternion<f32>,
}

impl Part {
    pub fn new(offset: Vector3<f32>, size: Vector3<f32>) -> Self {
        Self {
            offset,
            size,
            colour: [1.0; 4],
            texture: None,
            rotation: Quaternion::one(),
        }
    }

    pub fn with_colour(mut self, colour: [f32; 4]) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Colour after applying the texture tint, if any.
    pub fn shade(&self) -> [f32; 4] {
        match &self.texture {
            Some(texture) => {
                let tint = texture.average_colour();
                [
                    self.colour[0] * tint[0],
                    self.colour[1] * tint[1],
                    self.colour[2] * tint[2],
                    self.colour[3] * tint[3],
                ]
            }
            None => self.colour,
        }
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.offset)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.size.x, self.size.y, self.size.z)
    }
}

/// The drawable representation of an entity.
#[derive(Clone, Debug)]
pub struct Visual {
    pub label: String,
    pub transform: Transform,
    pub parts: Vec<Part>,
}

impl Visual {
    pub fn new(label: impl Into<String>, transform: Transform) -> Self {
        Self {
            label: label.into(),
            transform,
            parts: Vec::new(),
        }
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// World matrices and colours of all parts.
    pub fn instances(&self) -> impl Iterator<Item = (cgmath::Matrix4<f32>, [f32; 4])> + '_ {
        let world = self.transform.to_matrix();
        self.parts
            .iter()
            .map(move |part| (world * part.to_matrix(), part.shade()))
    }
}
