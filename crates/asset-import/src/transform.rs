//! Node transforms and axis-convention conversion.

use spintable_scene::{Aabb, Vec3};

/// A 4x4 affine transform in column-major order, matching the layout
/// produced by glTF node transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    /// Columns of the matrix.
    pub cols: [[f64; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Widen a glTF `f32` column-major matrix.
    pub fn from_gltf(m: [[f32; 4]; 4]) -> Mat4 {
        let mut cols = [[0.0; 4]; 4];
        for (c, col) in m.iter().enumerate() {
            for (r, v) in col.iter().enumerate() {
                cols[c][r] = *v as f64;
            }
        }
        Mat4 { cols }
    }

    /// `self * other` (apply `other` first).
    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let mut cols = [[0.0; 4]; 4];
        for c in 0..4 {
            for r in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.cols[k][r] * other.cols[c][k];
                }
                cols[c][r] = sum;
            }
        }
        Mat4 { cols }
    }

    /// Transform a point (w = 1).
    pub fn transform_point(&self, p: &Vec3) -> Vec3 {
        let m = &self.cols;
        Vec3::new(
            m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
            m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
            m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
        )
    }
}

/// Convert a point from glTF's Y-up convention to the host application's
/// Z-up convention: `(x, y, z) -> (x, -z, y)`.
pub fn point_to_z_up(p: &Vec3) -> Vec3 {
    Vec3::new(p.x, -p.z, p.y)
}

/// Convert a bounding box to Z-up. The corners are remapped and the box
/// rebuilt, since negating an axis swaps its min and max.
pub fn aabb_to_z_up(bounds: &Aabb) -> Aabb {
    let corners = bounds.corners();
    let converted: Vec<Vec3> = corners.iter().map(point_to_z_up).collect();
    Aabb::from_points(&converted).unwrap_or(Aabb::POINT)
}
