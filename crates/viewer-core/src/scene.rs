use crate::bounds::Aabb;
use crate::geometry::Geometry;
use crate::material::{Highlightable, Material};
use crate::texture::Texture;
use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Local translation / rotation / scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub mesh: Option<MeshId>,
    pub material: Option<Material>,
    /// Free-form metadata shown in the info panel.
    pub attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            visible: true,
            mesh: None,
            material: None,
            attributes: BTreeMap::new(),
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshId, material: impl Into<Material>) -> Self {
        self.mesh = Some(mesh);
        self.material = Some(material.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn highlightable(&self) -> Option<&dyn Highlightable> {
        self.material.as_ref()?.as_highlightable()
    }

    pub fn highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        self.material.as_mut()?.as_highlightable_mut()
    }
}

/// A node with its accumulated world transform and effective visibility.
#[derive(Clone, Copy, Debug)]
pub struct WorldNode {
    pub id: NodeId,
    pub world: Mat4,
    /// False when the node or any ancestor is hidden.
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<Node>,
    meshes: Vec<Geometry>,
    textures: FnvHashMap<TextureId, Texture>,
    next_texture: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Scene")
    }
}

impl Scene {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::new(root_name)],
            meshes: Vec::new(),
            textures: FnvHashMap::default(),
            next_texture: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Insert `node` under `parent`. An unknown parent falls back to the root.
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let parent = if parent.index() < self.nodes.len() {
            parent
        } else {
            log::warn!("[scene] unknown parent {:?}, attaching to root", parent);
            self.root()
        };
        let id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> MeshId {
        self.meshes.push(geometry);
        MeshId(self.meshes.len() as u32 - 1)
    }

    pub fn geometry(&self, id: MeshId) -> Option<&Geometry> {
        self.meshes.get(id.0 as usize)
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureId {
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, texture);
        id
    }

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    pub fn remove_texture(&mut self, id: TextureId) -> Option<Texture> {
        self.textures.remove(&id)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|id| self.nodes[id.index()].name == name)
    }

    /// `id` and everything below it, depth-first pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.node(id).is_none() {
            return out;
        }
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            out.push(cur);
            stack.extend(self.nodes[cur.index()].children.iter().rev().copied());
        }
        out
    }

    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.node(id)?;
        let mut m = node.transform.matrix();
        while let Some(parent) = node.parent {
            node = &self.nodes[parent.index()];
            m = node.transform.matrix() * m;
        }
        Some(m)
    }

    /// Every node with its world matrix, depth-first pre-order from the root.
    pub fn world_nodes(&self) -> Vec<WorldNode> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root(), Mat4::IDENTITY, true)];
        while let Some((id, parent_world, parent_visible)) = stack.pop() {
            let node = &self.nodes[id.index()];
            let world = parent_world * node.transform.matrix();
            let visible = parent_visible && node.visible;
            out.push(WorldNode { id, world, visible });
            for child in node.children.iter().rev() {
                stack.push((*child, world, visible));
            }
        }
        out
    }

    /// World-space bounds of every mesh at or below `id`; `None` if there are none.
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb> {
        let base = self.node(id)?.parent.and_then(|p| self.world_matrix(p));
        let base = base.unwrap_or(Mat4::IDENTITY);
        let mut bounds = Aabb::EMPTY;
        let mut stack = vec![(id, base)];
        while let Some((cur, parent_world)) = stack.pop() {
            let node = &self.nodes[cur.index()];
            let world = parent_world * node.transform.matrix();
            if let Some(geometry) = node.mesh.and_then(|m| self.geometry(m)) {
                bounds = bounds.union(&geometry.bounds().transformed(&world));
            }
            stack.extend(node.children.iter().map(|c| (*c, world)));
        }
        (!bounds.is_empty()).then_some(bounds)
    }

    /// Move a node by a world-space offset, whatever its parent's transform.
    pub fn translate_world(&mut self, id: NodeId, offset: Vec3) {
        let parent_world = self
            .node(id)
            .and_then(|n| n.parent)
            .and_then(|p| self.world_matrix(p))
            .unwrap_or(Mat4::IDENTITY);
        let local = parent_world.inverse().transform_vector3(offset);
        if let Some(node) = self.node_mut(id) {
            node.transform.translation += local;
        }
    }

    /// Move all of `other` into this scene under `parent`.
    ///
    /// Ids from `other` are remapped; the returned id is `other`'s root.
    pub fn attach(&mut self, other: Scene, parent: NodeId) -> NodeId {
        let parent = if self.node(parent).is_some() {
            parent
        } else {
            self.root()
        };
        let node_offset = self.nodes.len() as u32;
        let mesh_offset = self.meshes.len() as u32;

        let mut texture_map = FnvHashMap::default();
        let mut incoming: Vec<_> = other.textures.into_iter().collect();
        incoming.sort_by_key(|(id, _)| *id);
        for (old, texture) in incoming {
            texture_map.insert(old, self.add_texture(texture));
        }

        self.meshes.extend(other.meshes);
        for mut node in other.nodes {
            node.parent = node.parent.map(|p| NodeId(p.0 + node_offset));
            for child in node.children.iter_mut() {
                *child = NodeId(child.0 + node_offset);
            }
            node.mesh = node.mesh.map(|m| MeshId(m.0 + mesh_offset));
            if let Some(material) = node.material.as_mut() {
                let remapped = material.texture().and_then(|t| texture_map.get(&t).copied());
                material.replace_texture(remapped);
            }
            self.nodes.push(node);
        }

        let attached = NodeId(node_offset);
        self.nodes[attached.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(attached);
        attached
    }
}
