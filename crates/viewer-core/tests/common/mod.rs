#![allow(dead_code)]

use glam::Vec3;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll, Wake, Waker};
use viewer_core::{
    AssetLoader, Geometry, LoadError, Node, Scene, StandardMaterial, Texture, Transform,
    UnlitMaterial,
};

pub const EPS: f32 = 1e-3;

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
}

pub fn approx_vec(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

/// Three boxes under a "Model" root:
/// - "Tower" 10x30x10 centered at (0, 5, 0), lit, with attributes
/// - "Annex" 10x10x10 centered at (20, -5, 0), lit, no attributes
/// - unnamed 2x2x2 centered at (-20, 0, 0), unlit
///
/// World bounds before grounding: x -21..25, y -10..20, z -5..5.
pub fn sample_model() -> Scene {
    let mut scene = Scene::new("Model");
    let root = scene.root();

    let tower = scene.add_geometry(Geometry::cuboid(Vec3::new(10.0, 30.0, 10.0)));
    scene.add(
        root,
        Node::new("Tower")
            .with_transform(Transform::from_translation(Vec3::new(0.0, 5.0, 0.0)))
            .with_mesh(tower, StandardMaterial::default())
            .with_attribute("height", "30")
            .with_attribute("use", "residential"),
    );

    let annex = scene.add_geometry(Geometry::cuboid(Vec3::splat(10.0)));
    scene.add(
        root,
        Node::new("Annex")
            .with_transform(Transform::from_translation(Vec3::new(20.0, -5.0, 0.0)))
            .with_mesh(annex, StandardMaterial::default()),
    );

    let sign = scene.add_geometry(Geometry::cuboid(Vec3::splat(2.0)));
    scene.add(
        root,
        Node::new("")
            .with_transform(Transform::from_translation(Vec3::new(-20.0, 0.0, 0.0)))
            .with_mesh(sign, UnlitMaterial::default()),
    );
    scene
}

pub fn tile(rgba: [u8; 4]) -> Texture {
    Texture::from_rgba8(2, 2, rgba.repeat(4)).expect("2x2 tile")
}

/// In-memory loader keyed by URL. Unknown URLs fail with HTTP 404.
#[derive(Default)]
pub struct FakeLoader {
    pub models: HashMap<String, Scene>,
    pub textures: HashMap<String, Texture>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeLoader {
    pub fn with_model(mut self, url: &str, scene: Scene) -> Self {
        self.models.insert(url.to_string(), scene);
        self
    }

    pub fn with_texture(mut self, url: &str, texture: Texture) -> Self {
        self.textures.insert(url.to_string(), texture);
        self
    }
}

impl AssetLoader for FakeLoader {
    fn load_model(&self, url: &str) -> impl Future<Output = Result<Scene, LoadError>> {
        self.requests.borrow_mut().push(url.to_string());
        let result = self.models.get(url).cloned().ok_or(LoadError::Status {
            url: url.to_string(),
            status: 404,
        });
        async move { result }
    }

    fn load_texture(&self, url: &str) -> impl Future<Output = Result<Texture, LoadError>> {
        self.requests.borrow_mut().push(url.to_string());
        let result = self.textures.get(url).cloned().ok_or(LoadError::Status {
            url: url.to_string(),
            status: 404,
        });
        async move { result }
    }
}

struct NoopWake;

impl Wake for NoopWake {
    fn wake(self: Arc<Self>) {}
}

/// Poll a future a single time without an executor.
pub fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let waker = Waker::from(Arc::new(NoopWake));
    let mut cx = Context::from_waker(&waker);
    fut.poll(&mut cx)
}

/// Texture loader whose fetch of `slow_url` stays pending until `open`,
/// then fails as a network error. Other URLs resolve from `textures`.
pub struct GatedLoader {
    pub slow_url: String,
    pub textures: HashMap<String, Texture>,
    gate: Rc<Cell<bool>>,
}

impl GatedLoader {
    pub fn new(slow_url: &str) -> Self {
        Self {
            slow_url: slow_url.to_string(),
            textures: HashMap::new(),
            gate: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_texture(mut self, url: &str, texture: Texture) -> Self {
        self.textures.insert(url.to_string(), texture);
        self
    }

    pub fn open(&self) {
        self.gate.set(true);
    }
}

impl AssetLoader for GatedLoader {
    fn load_model(&self, url: &str) -> impl Future<Output = Result<Scene, LoadError>> {
        let err = LoadError::Status {
            url: url.to_string(),
            status: 404,
        };
        async move { Err(err) }
    }

    fn load_texture(&self, url: &str) -> impl Future<Output = Result<Texture, LoadError>> {
        let slow = url == self.slow_url;
        let gate = self.gate.clone();
        let url = url.to_string();
        let ready = self.textures.get(&url).cloned();
        async move {
            if slow {
                std::future::poll_fn(|_| {
                    if gate.get() {
                        Poll::Ready(())
                    } else {
                        Poll::Pending
                    }
                })
                .await;
                return Err(LoadError::fetch(&url, "network down"));
            }
            ready.ok_or(LoadError::Status { url, status: 404 })
        }
    }
}
