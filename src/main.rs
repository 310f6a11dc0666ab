use tank_scene::{config::SceneConfig, entities::tank_arena, flow};

/// Runs the tank arena. An optional first argument names a RON scene config.
fn main() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    #[cfg(target_arch = "wasm32")]
    let config = SceneConfig::default();

    let entities = tank_arena(&config);
    flow::run(config, entities)
}
