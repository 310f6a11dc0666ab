use crate::{
    camera::Camera,
    error::StartupError,
    scene::Scene,
    surface::{RenderHost, RenderSurface, Viewport},
};

/// What a [`HeadlessSurface`] saw in one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub width: u32,
    pub height: u32,
    pub aspect: f32,
    pub visuals: Vec<String>,
    pub parts: usize,
    pub lit: bool,
}

/// A surface that draws nothing and keeps a record of every frame instead.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    pixel_ratio: f64,
    frames: Vec<FrameRecord>,
}

impl HeadlessSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            pixel_ratio: viewport.pixel_ratio,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}

impl RenderSurface for HeadlessSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, scene: &Scene<'_>, camera: &Camera) -> anyhow::Result<()> {
        self.frames.push(FrameRecord {
            width: self.width,
            height: self.height,
            aspect: camera.aspect(),
            visuals: scene.visuals.iter().map(|visual| visual.label.clone()).collect(),
            parts: scene.part_count(),
            lit: scene.light.is_some(),
        });
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Host without a display. `attach_point: None` models a host document that lacks
/// the element the surface should go into.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    pub attach_point: Option<String>,
    pub viewport: Viewport,
}

impl HeadlessHost {
    pub fn new(attach_point: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            attach_point: Some(attach_point.into()),
            viewport: Viewport::new(width, height, 1.0),
        }
    }

    pub fn detached(width: u32, height: u32) -> Self {
        Self {
            attach_point: None,
            viewport: Viewport::new(width, height, 1.0),
        }
    }
}

impl RenderHost for HeadlessHost {
    type Surface = HeadlessSurface;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn attach(&mut self, target: &str, viewport: Viewport) -> Result<HeadlessSurface, StartupError> {
        match &self.attach_point {
            Some(id) if id == target => Ok(HeadlessSurface::new(viewport)),
            _ => Err(StartupError::NoAttachPoint {
                target: target.to_string(),
            }),
        }
    }
}
