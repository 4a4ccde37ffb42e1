use crate::constants::MODEL_ROOT_NAME;
use crate::error::LoadError;
use crate::geometry::Geometry;
use crate::material::StandardMaterial;
use crate::scene::{MeshId, Node, NodeId, Scene, TextureId, Transform};
use crate::texture::{Texture, WrapMode};
use fnv::FnvHashMap;
use glam::{Quat, Vec3, Vec4};
use std::collections::BTreeMap;

pub fn decode_texture(bytes: &[u8], url: &str) -> Result<Texture, LoadError> {
    let img = image::load_from_memory(bytes).map_err(|e| LoadError::decode(url, e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Texture::from_rgba8(width, height, rgba.into_raw())
        .map(|t| t.with_source(url))
        .ok_or_else(|| LoadError::decode(url, "image has no pixels"))
}

pub fn import_glb(bytes: &[u8], url: &str) -> Result<Scene, LoadError> {
    let (doc, buffers, images) =
        gltf::import_slice(bytes).map_err(|e| LoadError::decode(url, e.to_string()))?;

    let mut importer = Importer {
        scene: Scene::new(MODEL_ROOT_NAME),
        buffers: &buffers,
        images: &images,
        textures: FnvHashMap::default(),
        meshes: FnvHashMap::default(),
    };

    let Some(gltf_scene) = doc.default_scene().or_else(|| doc.scenes().next()) else {
        return Err(LoadError::decode(url, "glTF file has no scene"));
    };
    let root = importer.scene.root();
    for node in gltf_scene.nodes() {
        importer.node(root, &node);
    }

    let scene = importer.scene;
    log::info!(
        "[model] imported {} nodes, {} textures from {}",
        scene.node_count(),
        scene.texture_count(),
        url
    );
    Ok(scene)
}

struct Importer<'a> {
    scene: Scene,
    buffers: &'a [gltf::buffer::Data],
    images: &'a [gltf::image::Data],
    textures: FnvHashMap<usize, TextureId>,
    // glTF mesh index -> imported primitives, shared by every node using it
    meshes: FnvHashMap<usize, Vec<(MeshId, StandardMaterial)>>,
}

impl Importer<'_> {
    fn node(&mut self, parent: NodeId, node: &gltf::Node<'_>) {
        let (t, r, s) = node.transform().decomposed();
        let transform = Transform {
            translation: Vec3::from(t),
            rotation: Quat::from_array(r),
            scale: Vec3::from(s),
        };
        let name = node.name().unwrap_or_default().to_string();
        let attributes = node_attributes(node);

        let mut out = Node::new(name.clone()).with_transform(transform);
        out.attributes = attributes.clone();

        let primitives = node.mesh().map(|m| self.mesh(&m)).unwrap_or_default();

        let id = if primitives.len() == 1 {
            let (mesh, material) = primitives[0].clone();
            self.scene.add(parent, out.with_mesh(mesh, material))
        } else {
            let id = self.scene.add(parent, out);
            for (mesh, material) in primitives {
                let mut part = Node::new(name.clone()).with_mesh(mesh, material);
                part.attributes = attributes.clone();
                self.scene.add(id, part);
            }
            id
        };

        for child in node.children() {
            self.node(id, &child);
        }
    }

    fn mesh(&mut self, mesh: &gltf::Mesh<'_>) -> Vec<(MeshId, StandardMaterial)> {
        if let Some(parts) = self.meshes.get(&mesh.index()) {
            return parts.clone();
        }
        let parts: Vec<_> = mesh
            .primitives()
            .filter_map(|p| self.primitive(&p))
            .collect();
        self.meshes.insert(mesh.index(), parts.clone());
        parts
    }

    fn primitive(&mut self, prim: &gltf::Primitive<'_>) -> Option<(MeshId, StandardMaterial)> {
        if prim.mode() != gltf::mesh::Mode::Triangles {
            log::warn!("[model] skipping {:?} primitive", prim.mode());
            return None;
        }
        let buffers = self.buffers;
        let reader = prim.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
        let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
        if positions.is_empty() {
            return None;
        }
        let normals = reader.read_normals().map(|n| n.collect());
        let uvs = reader.read_tex_coords(0).map(|uv| uv.into_f32().collect());
        let indices = reader.read_indices().map(|i| i.into_u32().collect());
        let mesh = self
            .scene
            .add_geometry(Geometry::new(positions, normals, uvs, indices));

        let material = prim.material();
        let pbr = material.pbr_metallic_roughness();
        let base_color_texture = pbr
            .base_color_texture()
            .and_then(|info| self.texture(info.texture().source().index()));
        let material = StandardMaterial {
            base_color: Vec4::from(pbr.base_color_factor()),
            base_color_texture,
            emissive: Vec3::from(material.emissive_factor()),
            metallic: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
        };
        Some((mesh, material))
    }

    fn texture(&mut self, image: usize) -> Option<TextureId> {
        if let Some(id) = self.textures.get(&image) {
            return Some(*id);
        }
        let data = self.images.get(image)?;
        let Some(pixels) = to_rgba8(data) else {
            log::warn!("[model] unsupported image format {:?}", data.format);
            return None;
        };
        let mut texture = Texture::from_rgba8(data.width, data.height, pixels)?;
        texture.wrap = WrapMode::Repeat;
        let id = self.scene.add_texture(texture);
        self.textures.insert(image, id);
        Some(id)
    }
}

fn to_rgba8(data: &gltf::image::Data) -> Option<Vec<u8>> {
    use gltf::image::Format;
    let px = &data.pixels;
    let out = match data.format {
        Format::R8G8B8A8 => px.clone(),
        Format::R8G8B8 => px
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        Format::R8G8 => px
            .chunks_exact(2)
            .flat_map(|c| [c[0], c[0], c[0], c[1]])
            .collect(),
        Format::R8 => px.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        _ => return None,
    };
    Some(out)
}

fn node_attributes(node: &gltf::Node<'_>) -> BTreeMap<String, String> {
    let Some(raw) = node.extras().as_ref() else {
        return BTreeMap::new();
    };
    match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw.get()) {
        Ok(map) => map
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, v)
            })
            .collect(),
        Err(_) => {
            log::debug!("[model] ignoring non-object extras on {:?}", node.name());
            BTreeMap::new()
        }
    }
}
