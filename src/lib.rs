//! tank-scene
//!
//! The scene lifecycle and frame-update core of a small real-time 3D tank arena,
//! running natively and in the browser. A scene is loaded in two phases (first
//! the shared assets, then every entity in composition order) and only then
//! enters its frame loop, which updates all entities with the elapsed wall time
//! and hands the result to the renderer.
//!
//! High-level modules
//! - `assets`: the write-once texture cache and the storages it loads from
//! - `camera`: perspective camera and its projection
//! - `clock`: elapsed-time sampling between frames
//! - `config`: RON-loadable scene configuration
//! - `director`: the scene director, its lifecycle and frame scheduling
//! - `entity`: the entity contract and the visuals entities expose
//! - `entities`: the map and tank of the arena
//! - `flow`: winit event loop that drives a director in a window
//! - `scene`: what one frame submits to the renderer
//! - `surface`: render surfaces (wgpu and headless) and their hosts
//!

pub mod assets;
pub mod camera;
pub mod clock;
pub mod config;
pub mod director;
pub mod entities;
pub mod entity;
pub mod error;
pub mod flow;
pub mod scene;
pub mod surface;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Quaternion, Vector3};
pub use director::{FrameScheduler, Lifecycle, ManualScheduler, SceneDirector};
pub use entity::{Entity, LoadFuture, Part, Transform, Visual};
pub use error::{AssetError, LoadError, SceneError, StartupError};
pub use instant::Duration;
