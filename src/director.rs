//! Scene lifecycle and the per-frame pipeline.
//!
//! The [`SceneDirector`] is the composition root of a scene. It owns the render
//! surface, the camera, the entities, the asset cache and the clock, and moves
//! through an explicit [`Lifecycle`]:
//!
//! 1. `new()` attaches the surface to the host and sets up the camera
//! 2. `load()` loads the asset cache, then every entity one after another
//! 3. `frame()` runs one iteration of the frame loop, only once loading succeeded
//!
//! The host decides when frames happen. The director only asks for the next one
//! through an injected [`FrameScheduler`], which lets tests step the loop by hand.

use std::{cell::Cell, rc::Rc};

use instant::Duration;

use crate::{
    assets::{AssetCache, AssetStorage},
    camera::Camera,
    clock::Clock,
    config::SceneConfig,
    entity::Entity,
    error::{LoadError, SceneError, StartupError},
    scene::{HemisphereLight, Scene},
    surface::{RenderHost, RenderSurface, Viewport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, `load()` was not called yet.
    Constructed,
    Loading,
    /// The frame loop is live. Terminal.
    Running,
    /// Loading failed. Terminal, no frame is ever rendered.
    Failed,
}

/// Capability to ask the host for the next frame.
pub trait FrameScheduler {
    fn schedule_next(&mut self);
}

/// Scheduler that only counts requested ticks. The owner decides when to run them.
///
/// Clones share the same counter, so a test can keep one handle and give the
/// other to the director.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Rc<Cell<u64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> u64 {
        self.pending.get()
    }

    /// Consume one requested tick. Returns `false` when none is pending.
    pub fn take(&self) -> bool {
        match self.pending.get() {
            0 => false,
            n => {
                self.pending.set(n - 1);
                true
            }
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next(&mut self) {
        self.pending.set(self.pending.get() + 1);
    }
}

pub struct SceneDirector<S, F> {
    viewport: Viewport,
    surface: S,
    camera: Camera,
    entities: Vec<Box<dyn Entity>>,
    assets: AssetCache,
    light: Option<HemisphereLight>,
    light_template: HemisphereLight,
    clock: Clock,
    scheduler: F,
    lifecycle: Lifecycle,
    frames: u64,
}

impl<S: RenderSurface, F: FrameScheduler> SceneDirector<S, F> {
    /// Attach a surface to `host` and compose the scene from `entities`.
    ///
    /// Fails with [`StartupError::Config`] when `config` describes a camera that
    /// cannot be projected.
    ///
    /// The order of `entities` is the composition order: they are loaded, updated
    /// and drawn in exactly this order for the lifetime of the director.
    pub fn new<H>(
        host: &mut H,
        config: &SceneConfig,
        entities: Vec<Box<dyn Entity>>,
        scheduler: F,
    ) -> Result<Self, StartupError>
    where
        H: RenderHost<Surface = S>,
    {
        let viewport = host.viewport();
        let surface = host.attach(&config.attach_target, viewport)?;
        config.validate()?;
        let camera = Camera::new(&config.camera, viewport.width, viewport.height);
        log::info!(
            "scene attached to `{}` at {}x{} with {} entities",
            config.attach_target,
            viewport.width,
            viewport.height,
            entities.len()
        );
        Ok(Self {
            viewport,
            surface,
            camera,
            entities,
            assets: AssetCache::new(config.textures.clone()),
            light: None,
            light_template: HemisphereLight::from(&config.light),
            clock: Clock::new(),
            scheduler,
            lifecycle: Lifecycle::Constructed,
            frames: 0,
        })
    }

    /// Load the asset cache and then every entity, in composition order.
    ///
    /// Entities are awaited one after another, never concurrently. On success the
    /// director is Running and the first frame has been scheduled; on failure it
    /// is Failed for good.
    pub async fn load<St>(&mut self, storage: &St) -> Result<(), SceneError>
    where
        St: AssetStorage + ?Sized,
    {
        if self.lifecycle != Lifecycle::Constructed {
            return Err(SceneError::InvalidTransition {
                from: self.lifecycle,
                to: Lifecycle::Loading,
            });
        }
        self.lifecycle = Lifecycle::Loading;
        log::info!("loading scene");

        if let Err(e) = self.load_all(storage).await {
            log::error!("scene failed to load: {e}");
            self.lifecycle = Lifecycle::Failed;
            return Err(e.into());
        }

        self.light = Some(self.light_template);
        self.clock.reset();
        self.lifecycle = Lifecycle::Running;
        log::info!("scene loaded, starting the frame loop");
        self.scheduler.schedule_next();
        Ok(())
    }

    async fn load_all<St>(&mut self, storage: &St) -> Result<(), LoadError>
    where
        St: AssetStorage + ?Sized,
    {
        self.assets.load(storage).await?;
        for entity in self.entities.iter_mut() {
            log::debug!("loading entity `{}`", entity.name());
            let loaded = entity.load(&self.assets).await;
            if let Err(e) = loaded {
                return Err(LoadError::Entity {
                    entity: entity.name().to_string(),
                    source: Box::new(e),
                });
            }
            if entity.visual().is_none() {
                return Err(LoadError::MissingVisual {
                    entity: entity.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Run one iteration of the frame loop and return the elapsed time it used.
    ///
    /// All entities are updated before the frame is submitted. The next frame is
    /// requested even when rendering fails so the loop keeps going.
    pub fn frame(&mut self) -> Result<Duration, SceneError> {
        if self.lifecycle != Lifecycle::Running {
            return Err(SceneError::NotRunning {
                state: self.lifecycle,
            });
        }
        let dt = self.clock.delta();
        for entity in self.entities.iter_mut() {
            entity.update(dt);
        }

        let scene = Scene {
            visuals: self.entities.iter().filter_map(|e| e.visual()).collect(),
            light: self.light.as_ref(),
        };
        let rendered = self.surface.render(&scene, &self.camera);
        self.frames += 1;
        self.scheduler.schedule_next();
        rendered.map_err(SceneError::Render)?;
        Ok(dt)
    }

    /// Apply a new viewport size to the stored size, the surface and the camera.
    ///
    /// Zero-sized viewports (e.g. a minimised window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("ignoring resize to {width}x{height}");
            return;
        }
        self.viewport = Viewport::new(width, height, self.viewport.pixel_ratio);
        self.surface.resize(width, height);
        self.camera.set_aspect(self.viewport.aspect());
        self.camera.update_projection();
    }

    /// Bring the director to the host's current viewport.
    ///
    /// For hosts that may have missed resizes, e.g. while the scene was loading.
    /// Does nothing when the viewport did not change.
    pub fn sync_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport.pixel_ratio = viewport.pixel_ratio;
        self.resize(viewport.width, viewport.height);
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn assets(&self) -> &AssetCache {
        &self.assets
    }

    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> + '_ {
        self.entities.iter().map(|entity| entity.as_ref())
    }

    pub fn light(&self) -> Option<&HemisphereLight> {
        self.light.as_ref()
    }

    /// Number of frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
