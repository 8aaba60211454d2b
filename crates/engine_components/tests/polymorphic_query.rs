//! Capability queries over the stock components.

use std::collections::HashSet;
use std::sync::Arc;

use engine_components::{Color, Material, Mesh, Texture, Transform};
use engine_store::{ComponentStore, EntityRegistry};
use glam::Vec3;

fn store() -> ComponentStore {
    ComponentStore::new(Arc::new(EntityRegistry::new()))
}

#[test]
fn test_queries_partition_a_mixed_scene() {
    let mut store = store();

    // A: mesh + transform, no material.
    let a = store.registry().create();
    store.put(a, Mesh::unit_cube()).unwrap();
    store.put(a, Transform::from_position(Vec3::X)).unwrap();

    // B: mesh + texture.
    let b = store.registry().create();
    store.put(b, Mesh::unit_cube()).unwrap();
    store
        .put(b, Texture::new("bricks.png", vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0]))
        .unwrap();

    // C: transform only.
    let c = store.registry().create();
    store.put(c, Transform::default()).unwrap();

    assert_eq!(store.entities_with::<Mesh>(), HashSet::from([a, b]));
    assert_eq!(store.entities_with::<Transform>(), HashSet::from([a, c]));
    assert_eq!(store.entities_with::<dyn Material>(), HashSet::from([b]));
}

#[test]
fn test_texture_is_found_through_the_material_capability() {
    let mut store = store();
    let entity = store.registry().create();
    store
        .put(entity, Texture::new("bricks.png", vec![]))
        .unwrap();

    let material = store.get::<dyn Material>(entity).unwrap().unwrap();
    assert_eq!(material.reflectance(), 0.0);
    assert_eq!(material.ambient(), glam::Vec4::ONE);
}

#[test]
fn test_color_and_texture_unite_under_material() {
    let mut store = store();
    let colored = store.registry().create();
    let textured = store.registry().create();
    store.put(colored, Color::rgb(1.0, 0.0, 0.0)).unwrap();
    store.put(textured, Texture::new("wood.png", vec![])).unwrap();

    assert_eq!(
        store.entities_with::<dyn Material>(),
        HashSet::from([colored, textured])
    );
    // Exact-kind queries still see only their own kind.
    assert_eq!(store.entities_with::<Color>(), HashSet::from([colored]));
    assert_eq!(store.entities_with::<Texture>(), HashSet::from([textured]));
}

#[test]
fn test_entity_without_material_reports_none() {
    let mut store = store();
    let bare = store.registry().create();
    store.put(bare, Mesh::unit_plane()).unwrap();

    assert!(store.get::<dyn Material>(bare).unwrap().is_none());
}
