//! The seam between the scene core and whatever draws it.
//!
//! A [`RenderHost`] owns the place a surface is attached to (a browser element, a
//! native window) and produces the [`RenderSurface`] the director draws into.
//!
//! - [`headless`] records frames instead of drawing them
//! - [`gpu`] draws with wgpu into a winit window

pub mod gpu;
pub mod headless;

use crate::{camera::Camera, error::StartupError, scene::Scene};

pub use gpu::{WgpuSurface, WindowHost};
pub use headless::{FrameRecord, HeadlessHost, HeadlessSurface};

/// Size of the host viewport in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Zero-sized dimensions are clamped to one pixel.
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        crate::camera::aspect_of(self.width, self.height)
    }
}

pub trait RenderSurface {
    fn resize(&mut self, width: u32, height: u32);

    /// Draw `scene` as seen from `camera`.
    fn render(&mut self, scene: &Scene<'_>, camera: &Camera) -> anyhow::Result<()>;

    fn size(&self) -> (u32, u32);
}

pub trait RenderHost {
    type Surface: RenderSurface;

    fn viewport(&self) -> Viewport;

    /// Create the surface and attach it to the host element named `target`.
    ///
    /// Fails with [`StartupError::NoAttachPoint`] when the host has no such element.
    fn attach(&mut self, target: &str, viewport: Viewport) -> Result<Self::Surface, StartupError>;
}
