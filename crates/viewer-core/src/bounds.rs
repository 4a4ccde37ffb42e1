use glam::{Mat4, Vec3};

// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut b = Self::EMPTY;
        for p in points {
            b.extend(p);
        }
        b
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    #[inline]
    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    pub fn transformed(&self, m: &Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        Aabb::from_points(self.corners().into_iter().map(|c| m.transform_point3(c)))
    }

    pub fn translated(&self, offset: Vec3) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn ray_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let inv = dir.recip();
        let t0 = (self.min - origin) * inv;
        let t1 = (self.max - origin) * inv;
        let t_near = nan_safe_max(t0.min(t1));
        let t_far = nan_safe_min(t0.max(t1));
        if t_far < t_near.max(0.0) {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

// 0 * inf produces NaN for rays parallel to a slab whose origin lies on the
// slab boundary; those axes must not constrain the interval.
fn nan_safe_max(v: Vec3) -> f32 {
    [v.x, v.y, v.z]
        .into_iter()
        .filter(|x| !x.is_nan())
        .fold(f32::NEG_INFINITY, f32::max)
}

fn nan_safe_min(v: Vec3) -> f32 {
    [v.x, v.y, v.z]
        .into_iter()
        .filter(|x| !x.is_nan())
        .fold(f32::INFINITY, f32::min)
}
