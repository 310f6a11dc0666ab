use cgmath::perspective;
use tank_scene::{
    ManualScheduler, SceneDirector,
    surface::{HeadlessHost, HeadlessSurface, RenderSurface, Viewport},
};

use crate::common::test_utils::{storage_for, test_config};

mod common;

type HeadlessDirector = SceneDirector<HeadlessSurface, ManualScheduler>;

fn director(width: u32, height: u32) -> HeadlessDirector {
    SceneDirector::new(
        &mut HeadlessHost::new("app", width, height),
        &test_config(),
        Vec::new(),
        ManualScheduler::new(),
    )
    .unwrap()
}

fn assert_consistent(director: &HeadlessDirector, width: u32, height: u32) {
    let viewport = director.viewport();
    assert_eq!((viewport.width, viewport.height), (width, height));
    assert_eq!(director.surface().size(), (width, height));

    let camera = director.camera();
    let aspect = width as f32 / height as f32;
    assert_eq!(camera.aspect(), aspect);
    let (near, far) = camera.clip_planes();
    assert_eq!(camera.projection(), perspective(camera.fovy(), aspect, near, far));
}

#[test]
fn camera_starts_with_the_viewport_aspect() {
    let director = director(800, 600);

    assert_consistent(&director, 800, 600);
}

#[test]
fn resize_updates_viewport_surface_and_projection_together() {
    let mut director = director(800, 600);

    director.resize(1024, 768);
    assert_consistent(&director, 1024, 768);

    director.resize(400, 300);
    assert_consistent(&director, 400, 300);

    director.resize(1920, 1080);
    assert_consistent(&director, 1920, 1080);
}

#[test]
fn zero_sized_resize_is_ignored() {
    let mut director = director(800, 600);

    director.resize(0, 600);
    director.resize(800, 0);

    assert_consistent(&director, 800, 600);
}

#[tokio::test]
async fn next_frame_renders_with_the_new_size() {
    let mut director = director(800, 600);
    director.load(&storage_for(&test_config().textures)).await.unwrap();
    director.frame().unwrap();

    director.resize(1000, 500);
    director.frame().unwrap();

    let frames = director.surface().frames();
    assert_eq!((frames[0].width, frames[0].height), (800, 600));
    assert_eq!((frames[1].width, frames[1].height), (1000, 500));
    assert_eq!(frames[1].aspect, 2.0);
}

#[tokio::test]
async fn viewport_missed_while_loading_is_caught_up() {
    let mut director = director(800, 600);
    director.load(&storage_for(&test_config().textures)).await.unwrap();

    director.sync_viewport(Viewport::new(1024, 768, 2.0));

    assert_consistent(&director, 1024, 768);
    assert_eq!(director.viewport().pixel_ratio, 2.0);
    director.frame().unwrap();
    let frame = &director.surface().frames()[0];
    assert_eq!((frame.width, frame.height), (1024, 768));
}

#[test]
fn syncing_an_unchanged_viewport_changes_nothing() {
    let mut director = director(800, 600);
    let camera = director.camera().clone();

    director.sync_viewport(Viewport::new(800, 600, 1.0));

    assert_consistent(&director, 800, 600);
    assert_eq!(director.camera(), &camera);
}
