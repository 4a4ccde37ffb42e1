use crate::scene::TextureId;
use glam::{Vec3, Vec4};

pub trait Highlightable {
    fn emissive(&self) -> Vec3;
    fn set_emissive(&mut self, color: Vec3);
}

#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    pub base_color: Vec4,
    pub base_color_texture: Option<TextureId>,
    pub emissive: Vec3,
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            base_color: Vec4::ONE,
            base_color_texture: None,
            emissive: Vec3::ZERO,
            metallic: 0.0,
            roughness: 1.0,
        }
    }
}

impl Highlightable for StandardMaterial {
    fn emissive(&self) -> Vec3 {
        self.emissive
    }

    fn set_emissive(&mut self, color: Vec3) {
        self.emissive = color;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnlitMaterial {
    pub color: Vec4,
    pub texture: Option<TextureId>,
}

impl Default for UnlitMaterial {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            texture: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Standard(StandardMaterial),
    Unlit(UnlitMaterial),
}

impl From<StandardMaterial> for Material {
    fn from(m: StandardMaterial) -> Self {
        Material::Standard(m)
    }
}

impl From<UnlitMaterial> for Material {
    fn from(m: UnlitMaterial) -> Self {
        Material::Unlit(m)
    }
}

impl Material {
    pub fn as_highlightable(&self) -> Option<&dyn Highlightable> {
        match self {
            Material::Standard(m) => Some(m),
            Material::Unlit(_) => None,
        }
    }

    pub fn as_highlightable_mut(&mut self) -> Option<&mut dyn Highlightable> {
        match self {
            Material::Standard(m) => Some(m),
            Material::Unlit(_) => None,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Standard(_))
    }

    pub fn base_color(&self) -> Vec4 {
        match self {
            Material::Standard(m) => m.base_color,
            Material::Unlit(m) => m.color,
        }
    }

    pub fn emissive(&self) -> Vec3 {
        self.as_highlightable()
            .map_or(Vec3::ZERO, |h| h.emissive())
    }

    pub fn texture(&self) -> Option<TextureId> {
        match self {
            Material::Standard(m) => m.base_color_texture,
            Material::Unlit(m) => m.texture,
        }
    }

    pub fn replace_texture(&mut self, texture: Option<TextureId>) -> Option<TextureId> {
        let slot = match self {
            Material::Standard(m) => &mut m.base_color_texture,
            Material::Unlit(m) => &mut m.texture,
        };
        std::mem::replace(slot, texture)
    }
}
