#![allow(dead_code)]

use std::{cell::RefCell, io::Cursor, rc::Rc};

use futures::{FutureExt, future::LocalBoxFuture};
use image::{ImageFormat, Rgba, RgbaImage};
use tank_scene::{
    Duration, Entity, LoadError, LoadFuture, Part, SceneDirector, Transform, Vector3, Visual,
    assets::{AssetCache, AssetStorage, MemoryStorage},
    camera::Camera,
    config::{SceneConfig, TextureManifest},
    director::ManualScheduler,
    error::StartupError,
    scene::Scene,
    surface::{HeadlessHost, HeadlessSurface, RenderHost, RenderSurface, Viewport},
};

/// Shared log of what entities and surfaces were asked to do, in call order.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

/// A 2x2 PNG filled with `colour`.
pub fn png_bytes(colour: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(2, 2, Rgba(colour));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encoding a png in memory");
    bytes
}

pub fn small_manifest() -> TextureManifest {
    TextureManifest::new("textures", ["g1.png", "g2.png", "g3.png"])
}

/// A storage holding every texture of `manifest`, each in a different shade.
pub fn storage_for(manifest: &TextureManifest) -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    for (i, path) in manifest.paths().enumerate() {
        let shade = 40 + 60 * i as u8;
        storage.insert(path, png_bytes([shade, shade, 0, 255]));
    }
    storage
}

pub fn test_config() -> SceneConfig {
    SceneConfig {
        textures: small_manifest(),
        map_size: 3,
        ..SceneConfig::default()
    }
}

pub async fn loaded_cache(manifest: TextureManifest) -> AssetCache {
    let storage = storage_for(&manifest);
    let mut cache = AssetCache::new(manifest);
    cache.load(&storage).await.expect("loading the test textures");
    cache
}

/// Storage whose fetches never complete.
pub struct PendingStorage;

impl AssetStorage for PendingStorage {
    fn fetch<'a>(&'a self, _: &'a str) -> LocalBoxFuture<'a, Result<Vec<u8>, LoadError>> {
        futures::future::pending().boxed_local()
    }
}

/// Entity that writes every call it receives into a [`Journal`].
pub struct RecordingEntity {
    name: String,
    journal: Journal,
    fail: bool,
    without_visual: bool,
    visual: Option<Visual>,
    pub updates: Vec<Duration>,
}

impl RecordingEntity {
    pub fn new(name: &str, journal: &Journal) -> Self {
        Self {
            name: name.to_string(),
            journal: journal.clone(),
            fail: false,
            without_visual: false,
            visual: None,
            updates: Vec::new(),
        }
    }

    /// Make `load` fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Make `load` succeed without producing a visual.
    pub fn without_visual(mut self) -> Self {
        self.without_visual = true;
        self
    }

    pub fn boxed(self) -> Box<dyn Entity> {
        Box::new(self)
    }
}

impl Entity for RecordingEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn load<'a>(&'a mut self, _: &'a AssetCache) -> LoadFuture<'a> {
        async move {
            self.journal.borrow_mut().push(format!("load:{}", self.name));
            if self.fail {
                return Err(LoadError::Fetch {
                    path: format!("{}.bin", self.name),
                    source: "unreachable".into(),
                });
            }
            if !self.without_visual {
                let mut visual = Visual::new(self.name.clone(), Transform::default());
                visual.push(Part::new(
                    Vector3::new(0.0, 0.0, 0.0),
                    Vector3::new(1.0, 1.0, 1.0),
                ));
                self.visual = Some(visual);
            }
            Ok(())
        }
        .boxed_local()
    }

    fn update(&mut self, dt: Duration) {
        self.journal.borrow_mut().push(format!("update:{}", self.name));
        self.updates.push(dt);
    }

    fn visual(&self) -> Option<&Visual> {
        self.visual.as_ref()
    }
}

/// Headless surface that also writes each render into a [`Journal`].
pub struct RecordingSurface {
    inner: HeadlessSurface,
    journal: Journal,
}

impl RecordingSurface {
    pub fn inner(&self) -> &HeadlessSurface {
        &self.inner
    }
}

impl RenderSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.inner.resize(width, height);
    }

    fn render(&mut self, scene: &Scene<'_>, camera: &Camera) -> anyhow::Result<()> {
        self.journal.borrow_mut().push("render".to_string());
        self.inner.render(scene, camera)
    }

    fn size(&self) -> (u32, u32) {
        self.inner.size()
    }
}

pub struct RecordingHost {
    inner: HeadlessHost,
    journal: Journal,
}

impl RecordingHost {
    pub fn new(journal: &Journal) -> Self {
        Self {
            inner: HeadlessHost::new("app", 800, 600),
            journal: journal.clone(),
        }
    }
}

impl RenderHost for RecordingHost {
    type Surface = RecordingSurface;

    fn viewport(&self) -> Viewport {
        self.inner.viewport()
    }

    fn attach(&mut self, target: &str, viewport: Viewport) -> Result<RecordingSurface, StartupError> {
        Ok(RecordingSurface {
            inner: self.inner.attach(target, viewport)?,
            journal: self.journal.clone(),
        })
    }
}

pub type RecordingDirector = SceneDirector<RecordingSurface, ManualScheduler>;

/// A director over `entities` on a recording host, plus a handle on its scheduler.
pub fn recording_director(
    journal: &Journal,
    entities: Vec<Box<dyn Entity>>,
) -> (RecordingDirector, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let director = SceneDirector::new(
        &mut RecordingHost::new(journal),
        &test_config(),
        entities,
        scheduler.clone(),
    )
    .expect("attaching to the recording host");
    (director, scheduler)
}

/// Surface whose every render fails, as a lost GPU device would.
pub struct BrokenSurface {
    size: (u32, u32),
    pub attempts: u32,
}

impl RenderSurface for BrokenSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn render(&mut self, _: &Scene<'_>, _: &Camera) -> anyhow::Result<()> {
        self.attempts += 1;
        anyhow::bail!("device lost")
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}

pub struct BrokenHost;

impl RenderHost for BrokenHost {
    type Surface = BrokenSurface;

    fn viewport(&self) -> Viewport {
        Viewport::new(800, 600, 1.0)
    }

    fn attach(&mut self, _: &str, viewport: Viewport) -> Result<BrokenSurface, StartupError> {
        Ok(BrokenSurface {
            size: (viewport.width, viewport.height),
            attempts: 0,
        })
    }
}
