use glam::Vec3;

// Shared viewer tuning constants used by the core and the web frontend.

// Camera framing
pub const FIT_MARGIN: f32 = 1.2; // keeps the box corners inside the frustum
pub const FIT_DIRECTION: Vec3 = Vec3::new(0.5, 0.8, 0.5); // eye offset from the model center
// Clip planes and orbit limits after a fit, as multiples of the framing distance
pub const FIT_NEAR_RATIO: f32 = 0.01;
pub const FIT_FAR_RATIO: f32 = 100.0;
pub const FIT_MIN_ORBIT_RATIO: f32 = 0.05;
pub const FIT_MAX_ORBIT_RATIO: f32 = 10.0;

// Default perspective camera
pub const DEFAULT_FOV_Y_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.5;
pub const CAMERA_FAR: f32 = 50_000.0;
pub const DEFAULT_CAMERA_EYE: Vec3 = Vec3::new(60.0, 80.0, 60.0);

// Orbit navigation
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05; // share of the pending motion applied per 60 Hz frame
pub const ORBIT_REFERENCE_FPS: f32 = 60.0;
pub const ORBIT_ZOOM_BASE: f32 = 0.95; // distance scale per wheel notch
pub const ORBIT_MIN_DISTANCE: f32 = 0.1;
pub const ORBIT_MAX_DISTANCE: f32 = 20_000.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-3;

// Basemap ground plane
pub const BASEMAP_SIZE: f32 = 10_000.0;
pub const BASEMAP_REPEAT: f32 = 20.0; // tile repetitions along each axis
pub const BASEMAP_Y_OFFSET: f32 = -0.01; // just under the grounded model base
pub const BASEMAP_NODE_NAME: &str = "Basemap";

// Selection highlight
pub const HIGHLIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.353, 0.122); // #ff5a1f
pub const HIGHLIGHT_STRENGTH: f32 = 0.6;
pub const NEUTRAL_EMISSIVE: Vec3 = Vec3::ZERO;

// Assets
pub const MODEL_URL: &str = "models/model.glb";
pub const MODEL_ROOT_NAME: &str = "Model";

// Info panel text
pub const NO_ATTRIBUTES_PLACEHOLDER: &str = "No attributes";
pub const UNNAMED_OBJECT: &str = "Unnamed object";

#[inline]
pub fn highlight_emissive() -> Vec3 {
    HIGHLIGHT_COLOR * HIGHLIGHT_STRENGTH
}

#[inline]
pub fn default_fov_y_radians() -> f32 {
    DEFAULT_FOV_Y_DEG.to_radians()
}
