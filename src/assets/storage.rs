//! Where asset bytes come from.
//!
//! Natively assets are read from a directory on disk, on the web they are
//! requested relative to the page origin. Both resolve a path such as
//! `textures/g1.png` against a content root.

use std::collections::HashMap;

use futures::{FutureExt, future::LocalBoxFuture};

use crate::error::LoadError;

/// A content root named files can be fetched from.
///
/// Fetching never retries; a retry policy belongs to the implementation.
pub trait AssetStorage {
    fn fetch<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<Vec<u8>, LoadError>>;
}

/// Reads assets from a directory on the local file system.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FsStorage {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetStorage for FsStorage {
    fn fetch<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<Vec<u8>, LoadError>> {
        async move {
            tokio::fs::read(self.root.join(path))
                .await
                .map_err(|e| LoadError::Fetch {
                    path: path.to_string(),
                    source: e.into(),
                })
        }
        .boxed_local()
    }
}

/// Requests assets over HTTP relative to the page the module was served from.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct HttpStorage {
    root: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpStorage {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, LoadError> {
        let fetch_err = |e: Box<dyn std::error::Error + Send + Sync>| LoadError::Fetch {
            path: path.to_string(),
            source: e,
        };
        let origin = web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .ok_or_else(|| fetch_err("page origin is not available".into()))?;
        let base = reqwest::Url::parse(&format!("{}/{}/", origin, self.root.trim_matches('/')))
            .map_err(|e| fetch_err(e.into()))?;
        base.join(path).map_err(|e| fetch_err(e.into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl AssetStorage for HttpStorage {
    fn fetch<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<Vec<u8>, LoadError>> {
        async move {
            let url = self.url(path)?;
            let fetch_err = |e: reqwest::Error| LoadError::Fetch {
                path: path.to_string(),
                source: e.into(),
            };
            let response = reqwest::get(url)
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(fetch_err)?;
            let bytes = response.bytes().await.map_err(fetch_err)?;
            Ok::<_, LoadError>(bytes.to_vec())
        }
        .boxed_local()
    }
}

/// Serves assets from memory. Useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn with(mut self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl AssetStorage for MemoryStorage {
    fn fetch<'a>(&'a self, path: &'a str) -> LocalBoxFuture<'a, Result<Vec<u8>, LoadError>> {
        let found = self.files.get(path).cloned().ok_or_else(|| LoadError::Fetch {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such asset").into(),
        });
        futures::future::ready(found).boxed_local()
    }
}
