use crate::camera::PerspectiveCamera;
use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_POLAR_EPSILON,
    ORBIT_REFERENCE_FPS, ORBIT_ZOOM_BASE,
};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const MOTION_EPSILON: f32 = 1e-6;

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    theta_delta: f32,
    phi_delta: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            theta_delta: 0.0,
            phi_delta: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn rotate(&mut self, dx: f32, dy: f32, height: f32) {
        let h = height.max(1.0);
        self.theta_delta -= TAU * dx / h * self.rotate_speed;
        self.phi_delta -= TAU * dy / h * self.rotate_speed;
    }

    pub fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera, height: f32) {
        let h = height.max(1.0);
        let distance = (camera.eye - self.target).length() * (camera.fovy_radians * 0.5).tan();
        let (right, up) = camera.basis();
        let sx = 2.0 * dx * distance / h * self.pan_speed;
        let sy = 2.0 * dy * distance / h * self.pan_speed;
        self.pan_offset += -right * sx + up * sy;
    }

    pub fn dolly(&mut self, delta_y: f32) {
        let step = ORBIT_ZOOM_BASE.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= step;
        } else if delta_y > 0.0 {
            self.scale /= step;
        }
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn stop(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }

    pub fn is_moving(&self) -> bool {
        self.theta_delta.abs() > MOTION_EPSILON
            || self.phi_delta.abs() > MOTION_EPSILON
            || self.pan_offset.length_squared() > MOTION_EPSILON * MOTION_EPSILON
            || (self.scale - 1.0).abs() > MOTION_EPSILON
    }

    pub fn update(&mut self, camera: &mut PerspectiveCamera, dt_sec: f32) -> bool {
        if !self.is_moving() {
            return false;
        }
        let factor = if self.enable_damping {
            // same per-second decay regardless of frame rate
            let frames = (dt_sec * ORBIT_REFERENCE_FPS).max(0.0);
            1.0 - (1.0 - self.damping_factor.clamp(0.0, 1.0)).powf(frames)
        } else {
            1.0
        };

        let before = camera.eye;
        let before_target = self.target;

        let offset = camera.eye - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI * 0.5)
        };

        theta += self.theta_delta * factor;
        phi = (phi + self.phi_delta * factor).clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * factor;

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.look_at(self.target + offset, self.target);

        if self.enable_damping {
            let keep = 1.0 - factor;
            self.theta_delta *= keep;
            self.phi_delta *= keep;
            self.pan_offset *= keep;
            if !self.is_moving() {
                self.stop();
            }
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        before.distance_squared(camera.eye) > MOTION_EPSILON * MOTION_EPSILON
            || before_target.distance_squared(self.target) > MOTION_EPSILON * MOTION_EPSILON
    }
}
