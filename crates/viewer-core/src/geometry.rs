use crate::bounds::Aabb;
use glam::{Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct Geometry {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
    bounds: Aabb,
}

impl Geometry {
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Option<Vec<[f32; 3]>>,
        uvs: Option<Vec<[f32; 2]>>,
        indices: Option<Vec<u32>>,
    ) -> Self {
        let n = positions.len();
        let indices = indices.unwrap_or_else(|| (0..(n - n % 3) as u32).collect());
        let normals = match normals {
            Some(v) if v.len() == n => v,
            _ => compute_normals(&positions, &indices),
        };
        let uvs = match uvs {
            Some(v) if v.len() == n => v,
            _ => vec![[0.0, 0.0]; n],
        };
        let bounds = Aabb::from_points(positions.iter().copied().map(Vec3::from));
        Self {
            positions,
            normals,
            uvs,
            indices,
            bounds,
        }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let positions = vec![[-hw, -hh, 0.0], [hw, -hh, 0.0], [hw, hh, 0.0], [-hw, hh, 0.0]];
        let normals = vec![[0.0, 0.0, 1.0]; 4];
        let uvs = vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
        Self::new(
            positions,
            Some(normals),
            Some(uvs),
            Some(vec![0, 1, 2, 0, 2, 3]),
        )
    }

    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        // (normal, u axis, v axis) with u x v == normal so faces wind CCW
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut uvs = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (n, u, v) in faces {
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = (n + u * su + v * sv) * h;
                positions.push(p.to_array());
                normals.push(n.to_array());
                uvs.push(Vec2::new((su + 1.0) * 0.5, (1.0 - sv) * 0.5).to_array());
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self::new(positions, Some(normals), Some(uvs), Some(indices))
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let a = self.positions.get(tri[0] as usize)?;
            let b = self.positions.get(tri[1] as usize)?;
            let c = self.positions.get(tri[2] as usize)?;
            Some([Vec3::from(*a), Vec3::from(*b), Vec3::from(*c)])
        })
    }

    pub fn ray_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        self.bounds.ray_hit(origin, dir)?;
        self.triangles()
            .filter_map(|[a, b, c]| ray_triangle(origin, dir, a, b, c))
            .min_by(|x, y| x.total_cmp(y))
    }
}

pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= positions.len() || i1 >= positions.len() || i2 >= positions.len() {
            continue;
        }
        let a = Vec3::from(positions[i0]);
        let b = Vec3::from(positions[i1]);
        let c = Vec3::from(positions[i2]);
        // unnormalised cross product weights by triangle area
        let face = (b - a).cross(c - a);
        acc[i0] += face;
        acc[i1] += face;
        acc[i2] += face;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

// Möller–Trumbore ray/triangle test, double sided.
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPS: f32 = 1e-9;
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}
