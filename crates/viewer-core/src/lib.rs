pub mod basemap;
pub mod bounds;
pub mod camera;
pub mod constants;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod import;
pub mod lighting;
pub mod loader;
pub mod material;
pub mod orbit;
pub mod picking;
pub mod scene;
pub mod texture;
pub mod viewer;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use basemap::{BasemapKind, BasemapManager, BasemapOutcome, BasemapRequest};
pub use bounds::Aabb;
pub use camera::{PerspectiveCamera, Ray};
pub use error::{LoadError, ParseBasemapKindError};
pub use fit::{frame_distance, CameraFitter, FitResult};
pub use geometry::Geometry;
pub use import::{decode_texture, import_glb};
pub use lighting::{LightPreset, LightSettings, LightingRig};
pub use loader::AssetLoader;
pub use material::{Highlightable, Material, StandardMaterial, UnlitMaterial};
pub use orbit::OrbitControls;
pub use picking::{pointer_to_ndc, raycast, Hit, PickReport, Picker, Selection};
pub use scene::{MeshId, Node, NodeId, Scene, TextureId, Transform, WorldNode};
pub use texture::{Texture, WrapMode};
pub use viewer::{load_basemap, load_model, Viewer, ViewerConfig};
