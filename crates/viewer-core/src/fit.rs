use crate::bounds::Aabb;
use crate::camera::PerspectiveCamera;
use crate::constants::{
    FIT_DIRECTION, FIT_FAR_RATIO, FIT_MARGIN, FIT_MAX_ORBIT_RATIO, FIT_MIN_ORBIT_RATIO,
    FIT_NEAR_RATIO,
};
use crate::orbit::OrbitControls;
use crate::scene::{NodeId, Scene};
use glam::Vec3;

/// Distance from the box center at which a box of edge `max_dim` fits a
/// vertical field of view of `fov_y` radians, margin included.
pub fn frame_distance(max_dim: f32, fov_y: f32) -> f32 {
    (max_dim / (fov_y * 0.5).sin()).abs() * FIT_MARGIN
}

/// Translate `model` vertically so its lowest point sits on y = 0.
///
/// Returns the world bounds after the move, or `None` when the model has no
/// geometry.
pub fn ground_model(scene: &mut Scene, model: NodeId) -> Option<Aabb> {
    let bounds = scene.world_bounds(model)?;
    scene.translate_world(model, Vec3::new(0.0, -bounds.min.y, 0.0));
    scene.world_bounds(model)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult {
    pub center: Vec3,
    pub size: Vec3,
    pub max_dim: f32,
    pub distance: f32,
}

#[derive(Debug, Default)]
pub struct CameraFitter {
    fitted: bool,
}

impl CameraFitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fitted(&self) -> bool {
        self.fitted
    }

    /// Ground `model`, then place `camera` so the whole model is in view and
    /// retarget `controls` on its center.
    ///
    /// A model without geometry is left alone and does not count as fitted.
    pub fn fit(
        &mut self,
        scene: &mut Scene,
        model: NodeId,
        camera: &mut PerspectiveCamera,
        controls: &mut OrbitControls,
    ) -> Option<FitResult> {
        if self.fitted {
            log::debug!("[fit] model already framed, ignoring");
            return None;
        }
        let Some(bounds) = ground_model(scene, model) else {
            log::warn!("[fit] model has no geometry, camera left unchanged");
            return None;
        };
        self.fitted = true;

        let center = bounds.center();
        let size = bounds.size();
        let max_dim = size.max_element();
        let distance = frame_distance(max_dim, camera.fovy_radians);
        let eye = center + FIT_DIRECTION.normalize() * distance;

        camera.znear = distance * FIT_NEAR_RATIO;
        camera.zfar = distance * FIT_FAR_RATIO;
        camera.look_at(eye, center);
        controls.min_distance = distance * FIT_MIN_ORBIT_RATIO;
        controls.max_distance = distance * FIT_MAX_ORBIT_RATIO;
        controls.stop();
        controls.set_target(center);

        log::info!(
            "[fit] center=({:.2}, {:.2}, {:.2}) max_dim={:.2} distance={:.2}",
            center.x,
            center.y,
            center.z,
            max_dim,
            distance
        );
        Some(FitResult {
            center,
            size,
            max_dim,
            distance,
        })
    }
}
