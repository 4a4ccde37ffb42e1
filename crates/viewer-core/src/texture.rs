use glam::Vec2;
use image::imageops::FilterType;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    #[default]
    Clamp,
    Repeat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub source: Option<String>,
    pub wrap: WrapMode,
    pub repeat: Vec2,
}

impl Texture {
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            source: None,
            wrap: WrapMode::Clamp,
            repeat: Vec2::ONE,
        })
    }

    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
            source: None,
            wrap: WrapMode::Clamp,
            repeat: Vec2::ONE,
        }
    }

    pub fn with_source(mut self, url: impl Into<String>) -> Self {
        self.source = Some(url.into());
        self
    }

    pub fn downscaled(&self, max_dim: u32) -> Option<Texture> {
        let longest = self.width.max(self.height);
        if longest <= max_dim || max_dim == 0 {
            return None;
        }
        let scale = max_dim as f64 / longest as f64;
        let width = ((self.width as f64 * scale).round() as u32).clamp(1, max_dim);
        let height = ((self.height as f64 * scale).round() as u32).clamp(1, max_dim);
        let img = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())?;
        let resized = image::imageops::resize(&img, width, height, FilterType::Triangle);
        Some(Texture {
            width,
            height,
            pixels: resized.into_raw(),
            source: self.source.clone(),
            wrap: self.wrap,
            repeat: self.repeat,
        })
    }

    pub fn set_tiling(&mut self, repeat: Vec2) {
        self.wrap = WrapMode::Repeat;
        self.repeat = repeat;
    }
}
