//! Shared asset cache.
//!
//! The cache is filled exactly once during the Loading phase and is read-only
//! afterwards. Entities receive it by shared reference while they load and use it
//! to pick ground textures without caring which specific one they get.

pub mod storage;
pub mod texture;

use std::sync::Arc;

use rand::{Rng, seq::SliceRandom};

use crate::{
    config::TextureManifest,
    error::{AssetError, LoadError},
};

pub use storage::{AssetStorage, MemoryStorage};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FsStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::HttpStorage;
pub use texture::Texture;

#[derive(Debug, Default)]
pub struct AssetCache {
    manifest: TextureManifest,
    textures: Vec<Arc<Texture>>,
    loaded: bool,
}

impl AssetCache {
    pub fn new(manifest: TextureManifest) -> Self {
        Self {
            manifest,
            textures: Vec::new(),
            loaded: false,
        }
    }

    /// Fetch and decode every texture of the manifest.
    ///
    /// All fetches run concurrently on the current task. The cache is only
    /// populated when every single one succeeded; after a failure it stays empty
    /// and unloaded.
    pub async fn load<S: AssetStorage + ?Sized>(&mut self, storage: &S) -> Result<(), LoadError> {
        if self.loaded {
            return Err(AssetError::AlreadyLoaded.into());
        }
        let fetches = self.manifest.paths().map(|path| async move {
            let bytes = storage.fetch(&path).await?;
            Texture::from_bytes(&path, &bytes).map_err(|source| LoadError::Decode { path, source })
        });
        let textures = futures::future::try_join_all(fetches).await?;
        self.textures = textures.into_iter().map(Arc::new).collect();
        self.loaded = true;
        log::info!(
            "loaded {} textures from `{}`",
            self.textures.len(),
            self.manifest.dir
        );
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// All textures in load order.
    pub fn textures(&self) -> &[Arc<Texture>] {
        &self.textures
    }

    /// Look a texture up by its storage path, e.g. `textures/g3.png`.
    pub fn texture(&self, path: &str) -> Option<&Arc<Texture>> {
        self.textures.iter().find(|texture| texture.name() == path)
    }

    /// A texture chosen uniformly at random from the loaded set.
    pub fn random_texture(&self) -> Result<Arc<Texture>, AssetError> {
        self.random_texture_with(&mut rand::thread_rng())
    }

    pub fn random_texture_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Arc<Texture>, AssetError> {
        if !self.loaded {
            return Err(AssetError::NotLoaded);
        }
        self.textures.choose(rng).cloned().ok_or(AssetError::Empty)
    }
}
