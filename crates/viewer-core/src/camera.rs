use crate::constants::{default_fov_y_radians, CAMERA_FAR, CAMERA_NEAR, DEFAULT_CAMERA_EYE};
use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(default_fov_y_radians(), 1.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fovy_radians: f32, aspect: f32) -> Self {
        Self {
            eye: DEFAULT_CAMERA_EYE,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(f32::EPSILON),
            fovy_radians,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        self.eye = eye;
        self.target = target;
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize_or_zero();
        let up = right.cross(forward);
        (right, up)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn from_ndc(camera: &PerspectiveCamera, ndc: Vec2) -> Self {
        let inv = camera.view_projection().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        Self::new(camera.eye, far - camera.eye)
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
