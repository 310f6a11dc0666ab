//! Window and event loop that drive a [`SceneDirector`].
//!
//! The host side of the frame loop lives here: the winit application creates the
//! window, runs the load phase on the platform's executor and then turns winit
//! events into director calls.
//!
//! # Lifecycle Flow
//!
//! 1. `resumed` creates the window and the GPU context, attaches the surface and
//!    builds the director
//! 2. the director is loaded (blocking on tokio natively, `spawn_local` on the web)
//! 3. a successful load requests the first redraw
//! 4. every `RedrawRequested` runs one `frame()`, which requests the next redraw
//! 5. every `Resized` is forwarded to `resize()`

use std::{fmt::Debug, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::SceneConfig,
    director::{FrameScheduler, SceneDirector},
    entity::Entity,
    surface::{Viewport, WgpuSurface, WindowHost},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub type WindowDirector = SceneDirector<WgpuSurface, WindowScheduler>;

/// Schedules frames by asking the window for a redraw.
pub struct WindowScheduler {
    window: Arc<Window>,
}

impl WindowScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl FrameScheduler for WindowScheduler {
    fn schedule_next(&mut self) {
        self.window.request_redraw();
    }
}

// Only sent by the wasm loader.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) enum StageEvent {
    Loaded(Box<WindowDirector>),
    Failed(anyhow::Error),
}

impl Debug for StageEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(_) => f.write_str("Loaded(SceneDirector)"),
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
        }
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    proxy: winit::event_loop::EventLoopProxy<StageEvent>,
    config: SceneConfig,
    // Handed to the director once the window exists; `take()`n on first resume.
    entities: Option<Vec<Box<dyn Entity>>>,
    window: Option<Arc<Window>>,
    director: Option<WindowDirector>,
}

impl App {
    fn new(
        event_loop: &EventLoop<StageEvent>,
        config: SceneConfig,
        entities: Vec<Box<dyn Entity>>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy: event_loop.create_proxy(),
            config,
            entities: Some(entities),
            window: None,
            director: None,
        })
    }

    /// Start driving a loaded director.
    ///
    /// Resizes that arrived while the scene was loading were not seen by the
    /// director, so it is brought to the window's current size first.
    fn install(&mut self, mut director: WindowDirector) {
        if let Some(window) = &self.window {
            director.sync_viewport(window_viewport(window));
        }
        self.director = Some(director);
    }
}

fn window_viewport(window: &Window) -> Viewport {
    let size = window.inner_size();
    Viewport::new(size.width, size.height, window.scale_factor())
}

async fn start(
    window: Arc<Window>,
    config: SceneConfig,
    entities: Vec<Box<dyn Entity>>,
) -> anyhow::Result<WindowDirector> {
    let mut host = WindowHost::new(window.clone(), config.clear_colour).await?;
    let mut director = SceneDirector::new(
        &mut host,
        &config,
        entities,
        WindowScheduler::new(window),
    )?;
    #[cfg(not(target_arch = "wasm32"))]
    let storage = crate::assets::FsStorage::new(&config.asset_root);
    #[cfg(target_arch = "wasm32")]
    let storage = crate::assets::HttpStorage::new(&config.asset_root);
    director.load(&storage).await?;
    Ok(director)
}

impl ApplicationHandler<StageEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entities) = self.entities.take() else {
            return;
        };
        let window_attributes = Window::default_attributes().with_title(&self.config.window_title);
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create the window: {e}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window.clone());
        let init_future = start(window, self.config.clone(), entities);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let started = self.async_runtime.block_on(init_future);
            match started {
                Ok(director) => self.install(director),
                Err(e) => {
                    log::error!("Scene startup failed: {e:#}");
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match init_future.await {
                    Ok(director) => StageEvent::Loaded(Box::new(director)),
                    Err(e) => StageEvent::Failed(e),
                };
                if proxy.send_event(event).is_err() {
                    log::error!("Event loop was closed before the scene finished loading");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: StageEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            StageEvent::Loaded(director) => self.install(*director),
            StageEvent::Failed(e) => {
                log::error!("Scene startup failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            event_loop.exit();
            return;
        }
        // Events before the scene finished loading are caught up on in `install`.
        let Some(director) = &mut self.director else {
            return;
        };
        match event {
            WindowEvent::Resized(size) => director.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    director.sync_viewport(window_viewport(window));
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = director.frame() {
                    log::error!("Unable to render {e}");
                }
            }
            _ => {}
        }
    }
}

/// Open a window and run `entities` as a scene until the window is closed.
pub fn run(config: SceneConfig, entities: Vec<Box<dyn Entity>>) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<StageEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, config, entities)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Browser entry point: run the tank arena with the default configuration.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    let config = SceneConfig::default();
    let entities = crate::entities::tank_arena(&config);
    run(config, entities).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}
