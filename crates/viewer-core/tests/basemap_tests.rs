mod common;

use common::tile;
use glam::{Vec2, Vec3};
use viewer_core::constants::{BASEMAP_NODE_NAME, BASEMAP_SIZE};
use viewer_core::{
    BasemapKind, BasemapManager, BasemapOutcome, Material, NodeId, Scene, WrapMode,
};

fn plane_count(scene: &Scene) -> usize {
    scene
        .descendants(scene.root())
        .into_iter()
        .filter(|id| scene.node(*id).unwrap().name == BASEMAP_NODE_NAME)
        .count()
}

fn plane_texture_source(scene: &Scene, id: NodeId) -> Option<String> {
    let tex = scene.node(id)?.material.as_ref()?.texture()?;
    scene.texture(tex)?.source.clone()
}

#[test]
fn kinds_parse_from_selector_values() {
    assert_eq!("osm".parse::<BasemapKind>().unwrap(), BasemapKind::Osm);
    assert_eq!("satellite".parse::<BasemapKind>().unwrap(), BasemapKind::Satellite);
    assert_eq!(" Dark ".parse::<BasemapKind>().unwrap(), BasemapKind::Dark);
    assert!("terrain".parse::<BasemapKind>().is_err());
    assert_eq!(BasemapKind::default(), BasemapKind::Osm);
    for kind in BasemapKind::ALL {
        assert_eq!(kind.to_string().parse::<BasemapKind>().unwrap(), kind);
        assert!(kind.url().starts_with("https://"));
    }
}

#[test]
fn first_load_creates_horizontal_plane() {
    let mut scene = Scene::default();
    let mut basemap = BasemapManager::new();
    let request = basemap.begin(BasemapKind::Satellite);
    assert!(basemap.is_loading());

    let outcome = basemap.complete(&mut scene, &request, tile([0, 128, 0, 255]));
    let BasemapOutcome::Created(id) = outcome else {
        panic!("expected a new plane, got {outcome:?}");
    };
    assert!(!basemap.is_loading());
    assert_eq!(basemap.mesh(), Some(id));
    assert_eq!(basemap.active_kind(), Some(BasemapKind::Satellite));
    assert_eq!(plane_count(&scene), 1);

    let node = scene.node(id).unwrap();
    assert!(node.visible);
    assert!(matches!(node.material, Some(Material::Unlit(_))));
    assert_eq!(
        plane_texture_source(&scene, id).as_deref(),
        Some(BasemapKind::Satellite.url())
    );

    let bounds = scene.world_bounds(id).unwrap();
    assert!((bounds.size().x - BASEMAP_SIZE).abs() < 1e-2);
    assert!((bounds.size().z - BASEMAP_SIZE).abs() < 1e-2);
    assert!(bounds.size().y < 1e-2);
    assert!((bounds.center().y + 0.01).abs() < 1e-4);

    let tex = scene.node(id).unwrap().material.as_ref().unwrap().texture().unwrap();
    let tex = scene.texture(tex).unwrap();
    assert_eq!(tex.wrap, WrapMode::Repeat);
    assert_eq!(tex.repeat, Vec2::splat(20.0));
}

#[test]
fn later_loads_swap_texture_in_place() {
    let mut scene = Scene::default();
    let mut basemap = BasemapManager::new();
    let first = basemap.begin(BasemapKind::Osm);
    let BasemapOutcome::Created(id) = basemap.complete(&mut scene, &first, tile([1, 1, 1, 255]))
    else {
        panic!("expected a new plane");
    };
    let nodes = scene.node_count();

    let second = basemap.begin(BasemapKind::Dark);
    let outcome = basemap.complete(&mut scene, &second, tile([2, 2, 2, 255]));
    assert_eq!(outcome, BasemapOutcome::Updated(id));
    assert_eq!(scene.node_count(), nodes);
    assert_eq!(plane_count(&scene), 1);
    assert_eq!(scene.texture_count(), 1);
    assert_eq!(
        plane_texture_source(&scene, id).as_deref(),
        Some(BasemapKind::Dark.url())
    );
}

#[test]
fn stale_completion_is_discarded() {
    let mut scene = Scene::default();
    let mut basemap = BasemapManager::new();
    let slow = basemap.begin(BasemapKind::Osm);
    let fast = basemap.begin(BasemapKind::Satellite);

    let BasemapOutcome::Created(id) = basemap.complete(&mut scene, &fast, tile([3, 3, 3, 255]))
    else {
        panic!("expected a new plane");
    };
    let outcome = basemap.complete(&mut scene, &slow, tile([4, 4, 4, 255]));
    assert_eq!(
        outcome,
        BasemapOutcome::Superseded {
            seq: slow.seq,
            latest: fast.seq
        }
    );
    assert_eq!(plane_count(&scene), 1);
    assert_eq!(basemap.active_kind(), Some(BasemapKind::Satellite));
    assert_eq!(
        plane_texture_source(&scene, id).as_deref(),
        Some(BasemapKind::Satellite.url())
    );
}

#[test]
fn visibility_toggles_without_removing() {
    let mut scene = Scene::default();
    let mut basemap = BasemapManager::new();

    // remembered before the plane exists
    basemap.set_visible(&mut scene, false);
    let request = basemap.begin(BasemapKind::Osm);
    let BasemapOutcome::Created(id) = basemap.complete(&mut scene, &request, tile([5, 5, 5, 255]))
    else {
        panic!("expected a new plane");
    };
    assert!(!scene.node(id).unwrap().visible);

    basemap.set_visible(&mut scene, true);
    assert!(scene.node(id).unwrap().visible);
    basemap.set_visible(&mut scene, false);
    assert!(!scene.node(id).unwrap().visible);
    assert_eq!(plane_count(&scene), 1);
    assert_eq!(basemap.mesh(), Some(id));
}

#[test]
fn failed_request_clears_pending() {
    let mut basemap = BasemapManager::new();
    let request = basemap.begin(BasemapKind::Dark);
    assert!(basemap.wants(BasemapKind::Dark));
    assert_eq!(basemap.fail(&request), None);
    assert!(!basemap.is_loading());
    assert!(basemap.wants(BasemapKind::Dark));
    assert_eq!(basemap.active_kind(), None);
}

#[test]
fn failure_of_superseded_request_is_moot() {
    let mut basemap = BasemapManager::new();
    let first = basemap.begin(BasemapKind::Osm);
    let _second = basemap.begin(BasemapKind::Dark);
    assert_eq!(
        basemap.fail(&first),
        Some(BasemapOutcome::Superseded { seq: 1, latest: 2 })
    );
    // the newer request is still in flight
    assert!(basemap.is_loading());
}

#[test]
fn plane_faces_up() {
    let mut scene = Scene::default();
    let mut basemap = BasemapManager::new();
    let request = basemap.begin(BasemapKind::Osm);
    basemap.complete(&mut scene, &request, tile([6, 6, 6, 255]));
    let id = basemap.mesh().unwrap();
    let world = scene.world_matrix(id).unwrap();
    let normal = world.transform_vector3(Vec3::Z);
    assert!(normal.distance(Vec3::Y) < 1e-5);
}
