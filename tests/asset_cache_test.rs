use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use tank_scene::{
    AssetError, LoadError,
    assets::{AssetCache, FsStorage, MemoryStorage, Texture},
    config::TextureManifest,
};

use crate::common::test_utils::{loaded_cache, png_bytes, small_manifest, storage_for};

mod common;

#[test]
fn random_texture_before_load_is_an_error() {
    let cache = AssetCache::new(small_manifest());

    assert!(!cache.is_loaded());
    assert_eq!(cache.random_texture().unwrap_err(), AssetError::NotLoaded);
}

#[tokio::test]
async fn random_texture_is_a_member_of_the_loaded_set() {
    let cache = loaded_cache(small_manifest()).await;

    assert!(cache.is_loaded());
    assert_eq!(cache.len(), 3);
    for _ in 0..100 {
        let picked = cache.random_texture().unwrap();
        assert!(
            cache.textures().iter().any(|t| Arc::ptr_eq(t, &picked)),
            "{} is not one of the cached textures",
            picked.name()
        );
    }
}

#[tokio::test]
async fn loaded_set_keeps_manifest_order_and_never_changes() {
    let cache = loaded_cache(small_manifest()).await;
    let before: Vec<_> = cache.textures().to_vec();

    let names: Vec<_> = before.iter().map(|t| t.name().to_string()).collect();
    assert_eq!(
        names,
        ["textures/g1.png", "textures/g2.png", "textures/g3.png"]
    );

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        cache.random_texture_with(&mut rng).unwrap();
    }
    assert_eq!(cache.textures().len(), before.len());
    for (a, b) in cache.textures().iter().zip(&before) {
        assert!(Arc::ptr_eq(a, b));
    }
}

#[tokio::test]
async fn seeded_picks_are_reproducible() {
    let cache = loaded_cache(small_manifest()).await;
    let picks = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..20)
            .map(|_| cache.random_texture_with(&mut rng).unwrap().name().to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(picks(42), picks(42));
}

#[tokio::test]
async fn random_texture_uses_every_texture_eventually() {
    let cache = loaded_cache(small_manifest()).await;
    let mut rng = StdRng::seed_from_u64(1);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(cache.random_texture_with(&mut rng).unwrap().name().to_string());
    }

    assert_eq!(seen.len(), 3);
}

#[tokio::test]
async fn empty_manifest_loads_but_has_nothing_to_pick() {
    let cache = loaded_cache(TextureManifest::new("textures", Vec::<String>::new())).await;

    assert!(cache.is_loaded());
    assert!(cache.is_empty());
    assert_eq!(cache.random_texture().unwrap_err(), AssetError::Empty);
}

#[tokio::test]
async fn missing_asset_leaves_the_cache_unloaded() {
    let storage = MemoryStorage::new()
        .with("textures/g1.png", png_bytes([255, 0, 0, 255]))
        .with("textures/g3.png", png_bytes([0, 0, 255, 255]));
    let mut cache = AssetCache::new(small_manifest());

    let err = cache.load(&storage).await.unwrap_err();

    match err {
        LoadError::Fetch { path, .. } => assert_eq!(path, "textures/g2.png"),
        other => panic!("expected a fetch error, got {other:?}"),
    }
    assert!(!cache.is_loaded());
    assert!(cache.is_empty());
    assert_eq!(cache.random_texture().unwrap_err(), AssetError::NotLoaded);
}

#[tokio::test]
async fn undecodable_asset_is_a_decode_error() {
    let mut storage = storage_for(&small_manifest());
    storage.insert("textures/g3.png", b"definitely not a png".to_vec());
    let mut cache = AssetCache::new(small_manifest());

    let err = cache.load(&storage).await.unwrap_err();

    assert!(matches!(err, LoadError::Decode { ref path, .. } if path == "textures/g3.png"));
    assert!(!cache.is_loaded());
}

#[tokio::test]
async fn cache_is_write_once() {
    let manifest = small_manifest();
    let storage = storage_for(&manifest);
    let mut cache = AssetCache::new(manifest);
    cache.load(&storage).await.unwrap();
    let first = cache.textures().to_vec();

    let err = cache.load(&storage).await.unwrap_err();

    assert!(matches!(err, LoadError::Asset(AssetError::AlreadyLoaded)));
    assert!(cache.textures().iter().zip(&first).all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[tokio::test]
async fn textures_load_from_disk() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("tiles")).unwrap();
    std::fs::write(root.path().join("tiles/a.png"), png_bytes([10, 20, 30, 255])).unwrap();
    std::fs::write(root.path().join("tiles/b.png"), png_bytes([40, 50, 60, 255])).unwrap();
    let storage = FsStorage::new(root.path());
    let mut cache = AssetCache::new(TextureManifest::new("tiles", ["a.png", "b.png"]));

    cache.load(&storage).await.unwrap();

    assert_eq!(cache.len(), 2);
    let a = cache.texture("tiles/a.png").unwrap();
    assert_eq!(a.dimensions(), (2, 2));
    assert_eq!(a.image().get_pixel(0, 0).0, [10, 20, 30, 255]);
}

#[test]
fn texture_average_colour_is_normalised() {
    let texture = Texture::from_bytes("red.png", &png_bytes([255, 0, 0, 255])).unwrap();

    assert_eq!(texture.average_colour(), [1.0, 0.0, 0.0, 1.0]);
}
