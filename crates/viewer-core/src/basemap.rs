use crate::constants::{BASEMAP_NODE_NAME, BASEMAP_REPEAT, BASEMAP_SIZE, BASEMAP_Y_OFFSET};
use crate::error::ParseBasemapKindError;
use crate::geometry::Geometry;
use crate::material::UnlitMaterial;
use crate::scene::{Node, NodeId, Scene, Transform};
use crate::texture::Texture;
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BasemapKind {
    #[default]
    Osm,
    Satellite,
    Dark,
}

impl BasemapKind {
    pub const ALL: [BasemapKind; 3] = [BasemapKind::Osm, BasemapKind::Satellite, BasemapKind::Dark];

    pub fn url(self) -> &'static str {
        match self {
            BasemapKind::Osm => "https://tile.openstreetmap.org/0/0/0.png",
            BasemapKind::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/0/0/0"
            }
            BasemapKind::Dark => "https://basemaps.cartocdn.com/dark_all/0/0/0.png",
        }
    }

    /// Value used by the basemap selector.
    pub fn as_str(self) -> &'static str {
        match self {
            BasemapKind::Osm => "osm",
            BasemapKind::Satellite => "satellite",
            BasemapKind::Dark => "dark",
        }
    }
}

impl FromStr for BasemapKind {
    type Err = ParseBasemapKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        BasemapKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseBasemapKindError(s.to_string()))
    }
}

impl fmt::Display for BasemapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A texture fetch issued by [`BasemapManager::begin`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasemapRequest {
    pub seq: u64,
    pub kind: BasemapKind,
    pub url: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BasemapOutcome {
    /// First texture: the ground plane was added to the scene.
    Created(NodeId),
    /// The existing plane got the new texture.
    Updated(NodeId),
    /// A newer request was issued while this one was in flight; nothing changed.
    Superseded { seq: u64, latest: u64 },
}

#[derive(Debug)]
pub struct BasemapManager {
    mesh: Option<NodeId>,
    issued: u64,
    pending: Option<u64>,
    active: Option<BasemapKind>,
    visible: bool,
}

impl Default for BasemapManager {
    fn default() -> Self {
        Self {
            mesh: None,
            issued: 0,
            pending: None,
            active: None,
            visible: true,
        }
    }
}

impl BasemapManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self) -> Option<NodeId> {
        self.mesh
    }

    pub fn active_kind(&self) -> Option<BasemapKind> {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a load of `kind` is needed for it to end up on screen.
    pub fn wants(&self, kind: BasemapKind) -> bool {
        self.active != Some(kind) || self.pending.is_some()
    }

    pub fn begin(&mut self, kind: BasemapKind) -> BasemapRequest {
        self.issued += 1;
        self.pending = Some(self.issued);
        log::info!("[basemap] #{} requesting {} ({})", self.issued, kind, kind.url());
        BasemapRequest {
            seq: self.issued,
            kind,
            url: kind.url(),
        }
    }

    /// Put a fetched texture on the ground plane, creating the plane on first use.
    pub fn complete(
        &mut self,
        scene: &mut Scene,
        request: &BasemapRequest,
        mut texture: Texture,
    ) -> BasemapOutcome {
        if request.seq != self.issued {
            log::info!(
                "[basemap] dropping #{} ({}), #{} is newer",
                request.seq,
                request.kind,
                self.issued
            );
            return BasemapOutcome::Superseded {
                seq: request.seq,
                latest: self.issued,
            };
        }
        self.pending = None;
        self.active = Some(request.kind);

        texture.set_tiling(Vec2::splat(BASEMAP_REPEAT));
        if texture.source.is_none() {
            texture.source = Some(request.url.to_string());
        }
        let texture = scene.add_texture(texture);

        if let Some(id) = self.mesh {
            let previous = scene
                .node_mut(id)
                .and_then(|n| n.material.as_mut())
                .and_then(|m| m.replace_texture(Some(texture)));
            if let Some(old) = previous {
                scene.remove_texture(old);
            }
            log::info!("[basemap] switched to {}", request.kind);
            return BasemapOutcome::Updated(id);
        }

        let plane = scene.add_geometry(Geometry::plane(BASEMAP_SIZE, BASEMAP_SIZE));
        let transform = Transform {
            translation: Vec3::new(0.0, BASEMAP_Y_OFFSET, 0.0),
            rotation: Quat::from_rotation_x(-FRAC_PI_2),
            scale: Vec3::ONE,
        };
        let material = UnlitMaterial {
            texture: Some(texture),
            ..UnlitMaterial::default()
        };
        let mut node = Node::new(BASEMAP_NODE_NAME)
            .with_transform(transform)
            .with_mesh(plane, material);
        node.visible = self.visible;
        let id = scene.add(scene.root(), node);
        self.mesh = Some(id);
        log::info!("[basemap] ground plane created with {}", request.kind);
        BasemapOutcome::Created(id)
    }

    /// Forget a failed request so a later attempt with the same kind is not skipped.
    ///
    /// A failure of a request that has since been superseded is moot and is
    /// reported as [`BasemapOutcome::Superseded`].
    pub fn fail(&mut self, request: &BasemapRequest) -> Option<BasemapOutcome> {
        if request.seq != self.issued {
            return Some(BasemapOutcome::Superseded {
                seq: request.seq,
                latest: self.issued,
            });
        }
        if self.pending == Some(request.seq) {
            self.pending = None;
        }
        None
    }

    /// Show or hide the plane. Remembered until the plane exists.
    pub fn set_visible(&mut self, scene: &mut Scene, visible: bool) {
        self.visible = visible;
        if let Some(node) = self.mesh.and_then(|id| scene.node_mut(id)) {
            node.visible = visible;
        }
    }
}
