//! Axis-aligned bounding boxes in world space.

use serde::{Deserialize, Serialize};

/// A 3D point or direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    pub fn add(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(&self, factor: f64) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn negate(&self) -> Vec3 {
        self.scale(-1.0)
    }

    /// Largest component value.
    pub fn max_component(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }
}

/// Axis-aligned bounding box: minimum and maximum extent of an object
/// (and its children) in world space.
///
/// Degenerate boxes (min == max) are valid and represent a single point;
/// camera framing falls back to a fixed distance for them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// A degenerate box at the origin.
    pub const POINT: Aabb = Aabb {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all given points. Returns `None` for an
    /// empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Aabb> {
        let first = points.first()?;
        let mut bounds = Aabb::new(*first, *first);
        for p in &points[1..] {
            bounds = bounds.expand(p);
        }
        Some(bounds)
    }

    /// Grow the box to include a point.
    pub fn expand(&self, point: &Vec3) -> Aabb {
        Aabb::new(self.min.min(point), self.max.max(point))
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.min(&other.min), self.max.max(&other.max))
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vec3 {
        self.max.sub(&self.min)
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Largest extent across the three axes. This is the "size" used for
    /// camera fitting.
    pub fn max_dimension(&self) -> f64 {
        self.size().max_component()
    }

    /// Whether the box has zero extent on every axis.
    pub fn is_degenerate(&self) -> bool {
        self.max_dimension() <= 0.0
    }

    /// The eight corner points of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}
