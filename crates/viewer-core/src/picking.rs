use crate::camera::Ray;
use crate::constants::{highlight_emissive, NEUTRAL_EMISSIVE, UNNAMED_OBJECT};
use crate::scene::{NodeId, Scene};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Selected(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// What the info panel shows about a picked node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickReport {
    pub node: NodeId,
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl PickReport {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNNAMED_OBJECT
        } else {
            &self.name
        }
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}

/// Map a pointer position to normalized device coordinates of a rectangle.
///
/// x runs -1..1 left to right, y runs -1..1 bottom to top.
pub fn pointer_to_ndc(pointer: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Vec2 {
    let size = rect_size.max(Vec2::splat(1.0));
    let local = pointer - rect_origin;
    Vec2::new(local.x / size.x * 2.0 - 1.0, -(local.y / size.y * 2.0 - 1.0))
}

/// Nearest visible mesh hit along `ray`, scene order breaking ties.
pub fn raycast(scene: &Scene, ray: &Ray) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for entry in scene.world_nodes() {
        if !entry.visible {
            continue;
        }
        let Some(node) = scene.node(entry.id) else {
            continue;
        };
        let Some(geometry) = node.mesh.and_then(|m| scene.geometry(m)) else {
            continue;
        };
        let inv = entry.world.inverse();
        if !inv.is_finite() {
            continue;
        }
        // intersect in local space, measure in world space
        let origin = inv.transform_point3(ray.origin);
        let dir = inv.transform_vector3(ray.direction);
        let Some(t) = geometry.ray_hit(origin, dir) else {
            continue;
        };
        let point = entry.world.transform_point3(origin + dir * t);
        let distance = point.distance(ray.origin);
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Hit {
                node: entry.id,
                distance,
                point,
            });
        }
    }
    best
}

#[derive(Debug)]
pub struct Picker {
    selection: Selection,
    highlight: Vec3,
}

impl Default for Picker {
    fn default() -> Self {
        Self {
            selection: Selection::Idle,
            highlight: highlight_emissive(),
        }
    }
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<NodeId> {
        match self.selection {
            Selection::Idle => None,
            Selection::Selected(id) => Some(id),
        }
    }

    /// Select whatever `ray` hits first. A miss changes nothing and returns `None`.
    pub fn pick(&mut self, scene: &mut Scene, ray: &Ray) -> Option<PickReport> {
        let Some(hit) = raycast(scene, ray) else {
            log::debug!("[pick] no hit");
            return None;
        };
        self.select(scene, hit.node)
    }

    /// Move the highlight to `node` and report it. `None` if `node` does not exist.
    pub fn select(&mut self, scene: &mut Scene, node: NodeId) -> Option<PickReport> {
        scene.node(node)?;
        self.reset_previous(scene);

        let target = scene.node_mut(node)?;
        match target.highlightable_mut() {
            Some(h) => h.set_emissive(self.highlight),
            None => log::debug!("[pick] {:?} has no highlightable material", node),
        }
        self.selection = Selection::Selected(node);

        let report = PickReport {
            node,
            name: target.name.clone(),
            attributes: target
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        log::info!("[pick] selected {:?} '{}'", node, report.display_name());
        Some(report)
    }

    /// Remove the highlight and go idle. Returns whether anything was selected.
    pub fn clear(&mut self, scene: &mut Scene) -> bool {
        let was_selected = self.selected().is_some();
        self.reset_previous(scene);
        self.selection = Selection::Idle;
        was_selected
    }

    fn reset_previous(&mut self, scene: &mut Scene) {
        let Some(prev) = self.selected() else {
            return;
        };
        // the node may be gone or may not support highlighting
        if let Some(h) = scene.node_mut(prev).and_then(|n| n.highlightable_mut()) {
            h.set_emissive(NEUTRAL_EMISSIVE);
        }
    }
}
