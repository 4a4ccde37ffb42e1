use glam::Vec3;

pub fn rgb_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: Vec3,
    pub ground_color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

impl HemisphereLight {
    pub fn up(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSettings {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub hemisphere: HemisphereLight,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LightPreset {
    #[default]
    Day,
    Night,
}

impl LightPreset {
    pub fn from_night(is_night: bool) -> Self {
        if is_night {
            LightPreset::Night
        } else {
            LightPreset::Day
        }
    }

    pub fn is_night(self) -> bool {
        self == LightPreset::Night
    }

    pub fn settings(self) -> LightSettings {
        match self {
            LightPreset::Day => LightSettings {
                ambient: AmbientLight {
                    color: rgb_hex(0xffffff),
                    intensity: 0.6,
                },
                directional: DirectionalLight {
                    color: rgb_hex(0xffffff),
                    intensity: 1.0,
                    position: Vec3::new(100.0, 200.0, 100.0),
                },
                hemisphere: HemisphereLight {
                    sky_color: rgb_hex(0xffffff),
                    ground_color: rgb_hex(0x444444),
                    intensity: 0.6,
                    position: Vec3::new(0.0, 200.0, 0.0),
                },
            },
            LightPreset::Night => LightSettings {
                ambient: AmbientLight {
                    color: rgb_hex(0x404a7a),
                    intensity: 0.25,
                },
                directional: DirectionalLight {
                    color: rgb_hex(0x9fb4ff),
                    intensity: 0.35,
                    position: Vec3::new(-100.0, 200.0, -50.0),
                },
                hemisphere: HemisphereLight {
                    sky_color: rgb_hex(0x1c2a4a),
                    ground_color: rgb_hex(0x05070d),
                    intensity: 0.3,
                    position: Vec3::new(0.0, 200.0, 0.0),
                },
            },
        }
    }

    pub fn background(self) -> Vec3 {
        match self {
            LightPreset::Day => rgb_hex(0x87ceeb),
            LightPreset::Night => rgb_hex(0x0b1d3a),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightingRig {
    preset: LightPreset,
    settings: LightSettings,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self::new(LightPreset::Day)
    }
}

impl LightingRig {
    pub fn new(preset: LightPreset) -> Self {
        Self {
            preset,
            settings: preset.settings(),
        }
    }

    pub fn apply_preset(&mut self, is_night: bool) {
        let preset = LightPreset::from_night(is_night);
        self.preset = preset;
        self.settings = preset.settings();
        log::info!("[light] {:?} preset", preset);
    }

    pub fn preset(&self) -> LightPreset {
        self.preset
    }

    pub fn settings(&self) -> &LightSettings {
        &self.settings
    }

    pub fn background(&self) -> Vec3 {
        self.preset.background()
    }
}
