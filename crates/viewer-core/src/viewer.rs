use crate::basemap::{BasemapKind, BasemapManager, BasemapOutcome};
use crate::camera::{PerspectiveCamera, Ray};
use crate::constants::{default_fov_y_radians, MODEL_URL};
use crate::error::LoadError;
use crate::fit::{CameraFitter, FitResult};
use crate::lighting::LightingRig;
use crate::loader::AssetLoader;
use crate::orbit::OrbitControls;
use crate::picking::{PickReport, Picker};
use crate::scene::{NodeId, Scene};
use glam::{Vec2, Vec3};
use std::cell::RefCell;

/// Startup options, normally read from the initial state of the page controls.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub night: bool,
    pub basemap_enabled: bool,
    pub basemap_kind: BasemapKind,
    pub fov_y_radians: f32,
    pub model_url: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            night: false,
            basemap_enabled: false,
            basemap_kind: BasemapKind::Osm,
            fov_y_radians: default_fov_y_radians(),
            model_url: MODEL_URL.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Viewer {
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    lighting: LightingRig,
    basemap: BasemapManager,
    picker: Picker,
    fitter: CameraFitter,
    model: Option<NodeId>,
    basemap_enabled: bool,
    basemap_kind: BasemapKind,
    model_url: String,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let mut lighting = LightingRig::default();
        lighting.apply_preset(config.night);
        Self {
            scene: Scene::default(),
            camera: PerspectiveCamera::new(config.fov_y_radians, 1.0),
            controls: OrbitControls::default(),
            lighting,
            basemap: BasemapManager::new(),
            picker: Picker::new(),
            fitter: CameraFitter::new(),
            model: None,
            basemap_enabled: config.basemap_enabled,
            basemap_kind: config.basemap_kind,
            model_url: config.model_url,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn lighting(&self) -> &LightingRig {
        &self.lighting
    }

    pub fn basemap(&self) -> &BasemapManager {
        &self.basemap
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn model(&self) -> Option<NodeId> {
        self.model
    }

    pub fn model_url(&self) -> &str {
        &self.model_url
    }

    pub fn basemap_enabled(&self) -> bool {
        self.basemap_enabled
    }

    pub fn basemap_kind(&self) -> BasemapKind {
        self.basemap_kind
    }

    pub fn set_night_mode(&mut self, night: bool) {
        self.lighting.apply_preset(night);
    }

    pub fn is_night(&self) -> bool {
        self.lighting.preset().is_night()
    }

    pub fn background(&self) -> Vec3 {
        self.lighting.background()
    }

    /// Turn the ground plane on or off. Returns the kind to fetch when
    /// enabling requires a texture load.
    pub fn set_basemap_enabled(&mut self, enabled: bool) -> Option<BasemapKind> {
        self.basemap_enabled = enabled;
        self.basemap.set_visible(&mut self.scene, enabled);
        (enabled && self.basemap.wants(self.basemap_kind)).then_some(self.basemap_kind)
    }

    /// Change the selected tile source. Returns the kind to fetch if the
    /// basemap is shown.
    pub fn select_basemap(&mut self, kind: BasemapKind) -> Option<BasemapKind> {
        self.basemap_kind = kind;
        (self.basemap_enabled && self.basemap.wants(kind)).then_some(kind)
    }

    pub fn initial_basemap_request(&self) -> Option<BasemapKind> {
        self.basemap_enabled.then_some(self.basemap_kind)
    }

    /// Add a loaded model under the scene root and frame it the first time.
    pub fn attach_model(&mut self, model: Scene) -> (NodeId, Option<FitResult>) {
        let id = self.scene.attach(model, self.scene.root());
        self.model = Some(id);
        let fit = self
            .fitter
            .fit(&mut self.scene, id, &mut self.camera, &mut self.controls);
        (id, fit)
    }

    /// Frame the model again; only has an effect before the first successful fit.
    pub fn fit_camera(&mut self) -> Option<FitResult> {
        let model = self.model?;
        self.fitter
            .fit(&mut self.scene, model, &mut self.camera, &mut self.controls)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_aspect(width, height);
    }

    pub fn tick(&mut self, dt_sec: f32) -> bool {
        self.controls.update(&mut self.camera, dt_sec)
    }

    pub fn rotate_view(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        self.controls.rotate(dx, dy, viewport_height);
    }

    pub fn pan_view(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        self.controls.pan(dx, dy, &self.camera, viewport_height);
    }

    pub fn zoom_view(&mut self, delta_y: f32) {
        self.controls.dolly(delta_y);
    }

    pub fn click(&mut self, ndc: Vec2) -> Option<PickReport> {
        let ray = Ray::from_ndc(&self.camera, ndc);
        self.picker.pick(&mut self.scene, &ray)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.picker.clear(&mut self.scene)
    }
}

pub async fn load_model<L: AssetLoader>(
    viewer: &RefCell<Viewer>,
    loader: &L,
) -> Result<NodeId, LoadError> {
    let url = viewer.borrow().model_url.clone();
    log::info!("[model] loading {}", url);
    let model = loader.load_model(&url).await?;
    let (id, _) = viewer.borrow_mut().attach_model(model);
    Ok(id)
}

/// Fetch the tile texture for `kind` and put it on the ground plane.
///
/// A failed fetch leaves the current texture in place and is returned, unless
/// a newer request was issued meanwhile.
pub async fn load_basemap<L: AssetLoader>(
    viewer: &RefCell<Viewer>,
    loader: &L,
    kind: BasemapKind,
) -> Result<BasemapOutcome, LoadError> {
    let request = viewer.borrow_mut().basemap.begin(kind);
    match loader.load_texture(request.url).await {
        Ok(texture) => {
            let mut v = viewer.borrow_mut();
            let v = &mut *v;
            Ok(v.basemap.complete(&mut v.scene, &request, texture))
        }
        Err(err) => {
            let stale = viewer.borrow_mut().basemap.fail(&request);
            if let Some(outcome) = stale {
                log::info!("[basemap] ignoring failed #{} ({}): {}", request.seq, kind, err);
                return Ok(outcome);
            }
            log::warn!("[basemap] {}", err);
            Err(err)
        }
    }
}
