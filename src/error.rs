//! Error taxonomy of the scene core.
//!
//! - [`StartupError`] aborts construction of the director.
//! - [`LoadError`] is surfaced by the load phase; the frame loop never starts after one.
//! - [`AssetError`] and the state variants of [`SceneError`] are programming errors that
//!   fail loudly instead of handing out a sentinel value.

use crate::director::Lifecycle;

/// Construction of the render context failed. Nothing of the director exists yet.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("unable to find target element `{target}` to attach the render surface to")]
    NoAttachPoint { target: String },
    #[error(transparent)]
    Surface(#[from] anyhow::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A fetch, decode or entity load failed during the Loading phase.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch asset `{path}`")]
    Fetch {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to decode asset `{path}`")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("entity `{entity}` failed to load")]
    Entity {
        entity: String,
        #[source]
        source: Box<LoadError>,
    },
    #[error("entity `{entity}` finished loading without a visual")]
    MissingVisual { entity: String },
}

/// Misuse of the [`AssetCache`](crate::assets::AssetCache).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("asset cache was read before it finished loading")]
    NotLoaded,
    #[error("asset cache is loaded but holds no textures")]
    Empty,
    #[error("asset cache is write-once and was already loaded")]
    AlreadyLoaded,
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("scene failed to load")]
    Load(#[from] LoadError),
    #[error("the frame loop only runs after a successful load (current state: {state:?})")]
    NotRunning { state: Lifecycle },
    #[error("cannot move the scene from {from:?} to {to:?}")]
    InvalidTransition { from: Lifecycle, to: Lifecycle },
    #[error(transparent)]
    Render(anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read scene config")]
    Io(#[from] std::io::Error),
    #[error("could not parse scene config")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid scene config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
