use glam::Vec3;
use viewer_core::{OrbitControls, PerspectiveCamera};

fn setup() -> (OrbitControls, PerspectiveCamera) {
    let mut camera = PerspectiveCamera::default();
    camera.look_at(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO);
    (OrbitControls::default(), camera)
}

fn run(controls: &mut OrbitControls, camera: &mut PerspectiveCamera, frames: usize) {
    for _ in 0..frames {
        controls.update(camera, 1.0 / 60.0);
    }
}

#[test]
fn idle_update_does_nothing() {
    let (mut controls, mut camera) = setup();
    let eye = camera.eye;
    assert!(!controls.update(&mut camera, 1.0 / 60.0));
    assert_eq!(camera.eye, eye);
}

#[test]
fn rotation_keeps_distance_and_converges() {
    let (mut controls, mut camera) = setup();
    controls.rotate(100.0, 0.0, 600.0);
    assert!(controls.update(&mut camera, 1.0 / 60.0));
    run(&mut controls, &mut camera, 600);

    assert!(!controls.is_moving());
    assert!((camera.eye.length() - 50.0).abs() < 1e-3);
    // total azimuth change approaches 2*pi*dx/h
    let expected = -std::f32::consts::TAU * 100.0 / 600.0;
    let azimuth = camera.eye.x.atan2(camera.eye.z);
    assert!((azimuth - expected).abs() < 1e-3, "azimuth {azimuth}");
}

#[test]
fn damping_spreads_motion_over_frames() {
    let (mut controls, mut camera) = setup();
    controls.rotate(100.0, 0.0, 600.0);
    controls.update(&mut camera, 1.0 / 60.0);
    let first = camera.eye.x.atan2(camera.eye.z).abs();
    let full = std::f32::consts::TAU * 100.0 / 600.0;
    assert!((first - full * 0.05).abs() < 1e-4);
}

#[test]
fn no_damping_applies_at_once() {
    let (mut controls, mut camera) = setup();
    controls.enable_damping = false;
    controls.rotate(0.0, 50.0, 500.0);
    controls.update(&mut camera, 1.0 / 60.0);
    assert!(!controls.is_moving());
    assert!(!controls.update(&mut camera, 1.0 / 60.0));
}

#[test]
fn polar_angle_is_clamped() {
    let (mut controls, mut camera) = setup();
    controls.enable_damping = false;
    controls.rotate(0.0, 10_000.0, 100.0);
    controls.update(&mut camera, 1.0 / 60.0);
    assert!(camera.eye.y > 0.0);
    let horizontal = Vec3::new(camera.eye.x, 0.0, camera.eye.z).length();
    assert!(horizontal > 0.0);
    assert!(camera.eye.is_finite());
}

#[test]
fn wheel_dollies_in_and_out() {
    let (mut controls, mut camera) = setup();
    controls.dolly(-120.0);
    controls.update(&mut camera, 1.0 / 60.0);
    assert!((camera.eye.length() - 50.0 * 0.95).abs() < 1e-3);

    controls.dolly(120.0);
    controls.dolly(120.0);
    controls.update(&mut camera, 1.0 / 60.0);
    assert!((camera.eye.length() - 50.0 / 0.95).abs() < 1e-3);
}

#[test]
fn pan_moves_target_in_screen_plane() {
    let (mut controls, mut camera) = setup();
    controls.enable_damping = false;
    controls.pan(100.0, 0.0, &camera, 600.0);
    controls.update(&mut camera, 1.0 / 60.0);
    // dragging right moves the scene right, so the target moves left
    assert!(controls.target.x < 0.0);
    assert!(controls.target.y.abs() < 1e-5);
    assert!(((camera.eye - controls.target).length() - 50.0).abs() < 1e-3);
    assert_eq!(camera.target, controls.target);
}
