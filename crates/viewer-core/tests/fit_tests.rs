mod common;

use common::{approx, approx_vec, sample_model};
use glam::{Quat, Vec3};
use viewer_core::fit::{frame_distance, ground_model};
use viewer_core::{
    CameraFitter, Geometry, Node, OrbitControls, PerspectiveCamera, Scene, StandardMaterial,
    Transform,
};

fn attach_sample(scene: &mut Scene) -> viewer_core::NodeId {
    let root = scene.root();
    scene.attach(sample_model(), root)
}

#[test]
fn frame_distance_matches_formula() {
    let fov = 60f32.to_radians();
    assert!(approx(frame_distance(46.0, fov), 46.0 / 0.5 * 1.2));
    // negative sizes cannot produce a negative distance
    assert!(frame_distance(-10.0, fov) > 0.0);
    let narrow = 20f32.to_radians();
    assert!(frame_distance(5.0, narrow) > frame_distance(5.0, fov));
}

#[test]
fn fit_places_camera_at_framing_distance() {
    let mut scene = Scene::default();
    let model = attach_sample(&mut scene);
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    let mut fitter = CameraFitter::new();

    let fit = fitter
        .fit(&mut scene, model, &mut camera, &mut controls)
        .expect("model has geometry");

    assert!(approx(fit.max_dim, 46.0));
    assert!(approx_vec(fit.center, Vec3::new(2.0, 15.0, 0.0)));
    let expected = 46.0 / (camera.fovy_radians * 0.5).sin() * 1.2;
    assert!(approx(fit.distance, expected));
    assert!(approx(camera.eye.distance(fit.center), expected));
    assert_eq!(camera.target, fit.center);
    assert_eq!(controls.target, fit.center);

    // eye lies along the fixed diagonal
    let dir = (camera.eye - fit.center).normalize();
    assert!(approx_vec(dir, Vec3::new(0.5, 0.8, 0.5).normalize()));
}

#[test]
fn grounding_puts_lowest_point_on_zero() {
    let mut scene = Scene::default();
    let model = attach_sample(&mut scene);
    let bounds = ground_model(&mut scene, model).unwrap();
    assert!(bounds.min.y.abs() < 1e-4);
    assert!(approx(bounds.max.y, 30.0));
}

#[test]
fn grounding_respects_parent_transform() {
    let mut scene = Scene::default();
    let root = scene.root();
    let parent = scene.add(
        root,
        Node::new("Frame").with_transform(Transform {
            translation: Vec3::new(0.0, 7.0, 0.0),
            rotation: Quat::from_rotation_z(0.3),
            scale: Vec3::splat(2.0),
        }),
    );
    let model = scene.attach(sample_model(), parent);

    let bounds = ground_model(&mut scene, model).unwrap();
    assert!(bounds.min.y.abs() < 1e-3, "min y = {}", bounds.min.y);
    let again = scene.world_bounds(model).unwrap();
    assert!(again.min.y.abs() < 1e-3);
}

#[test]
fn grounding_lifts_model_below_ground() {
    let mut scene = Scene::default();
    let root = scene.root();
    let mesh = scene.add_geometry(Geometry::cuboid(Vec3::splat(4.0)));
    let model = scene.add(
        root,
        Node::new("Cube")
            .with_transform(Transform::from_translation(Vec3::new(0.0, -100.0, 0.0)))
            .with_mesh(mesh, StandardMaterial::default()),
    );
    let bounds = ground_model(&mut scene, model).unwrap();
    assert!(bounds.min.y.abs() < 1e-4);
    assert!(approx(bounds.max.y, 4.0));
}

#[test]
fn second_fit_is_a_no_op() {
    let mut scene = Scene::default();
    let model = attach_sample(&mut scene);
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    let mut fitter = CameraFitter::new();

    fitter.fit(&mut scene, model, &mut camera, &mut controls).unwrap();
    let eye = camera.eye;
    let target = camera.target;

    scene.translate_world(model, Vec3::new(50.0, 0.0, 0.0));
    assert!(fitter.fit(&mut scene, model, &mut camera, &mut controls).is_none());
    assert_eq!(camera.eye, eye);
    assert_eq!(camera.target, target);
    assert!(fitter.has_fitted());
}

#[test]
fn empty_model_does_not_consume_fit() {
    let mut scene = Scene::default();
    let root = scene.root();
    let empty = scene.add(root, Node::new("Empty"));
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    let mut fitter = CameraFitter::new();
    let eye = camera.eye;

    assert!(fitter.fit(&mut scene, empty, &mut camera, &mut controls).is_none());
    assert_eq!(camera.eye, eye);
    assert!(!fitter.has_fitted());

    let model = attach_sample(&mut scene);
    assert!(fitter.fit(&mut scene, model, &mut camera, &mut controls).is_some());
}

fn fit_cube(edge: f32) -> (Scene, viewer_core::NodeId, PerspectiveCamera, OrbitControls, f32) {
    let mut scene = Scene::default();
    let root = scene.root();
    let mesh = scene.add_geometry(Geometry::cuboid(Vec3::splat(edge)));
    let model = scene.add(
        root,
        Node::new("Cube").with_mesh(mesh, StandardMaterial::default()),
    );
    let mut camera = PerspectiveCamera::default();
    let mut controls = OrbitControls::default();
    let fit = CameraFitter::new()
        .fit(&mut scene, model, &mut camera, &mut controls)
        .unwrap();
    (scene, model, camera, controls, fit.distance)
}

fn assert_fully_in_view(scene: &Scene, model: viewer_core::NodeId, camera: &PerspectiveCamera) {
    let vp = camera.view_projection();
    for corner in scene.world_bounds(model).unwrap().corners() {
        let clip = vp * corner.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0, "corner {corner} behind the camera");
        assert!((0.0..=1.0).contains(&ndc.z), "corner {corner} depth {}", ndc.z);
        assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "corner {corner} at {ndc}");
    }
}

#[test]
fn tiny_model_is_not_clipped() {
    let (scene, model, camera, _, distance) = fit_cube(0.05);
    assert!(camera.znear < distance * 0.5);
    assert_fully_in_view(&scene, model, &camera);
}

#[test]
fn huge_model_is_framed_and_orbit_keeps_distance() {
    let (scene, model, mut camera, mut controls, distance) = fit_cube(10_000.0);
    assert!(camera.zfar > distance * 2.0);
    assert_fully_in_view(&scene, model, &camera);

    assert!(controls.max_distance >= distance);
    assert!(controls.min_distance <= distance);
    controls.rotate(10.0, 0.0, 800.0);
    assert!(controls.update(&mut camera, 1.0 / 60.0));
    assert!(approx(camera.eye.distance(controls.target), distance));
}
