//! Axis-aligned bounding boxes.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box in min/max form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box from explicit corners (swapped per axis if inverted).
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box from center and half extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let h = half_extents.abs();
        Self {
            min: center - h,
            max: center + h,
        }
    }

    /// Smallest box enclosing all `points`, or `None` when empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self { min, max })
    }

    /// Box center.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half extents along each axis.
    #[inline]
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Radius of the bounding sphere through the corners.
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.half_extents().length()
    }

    /// Smallest box enclosing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// World-space box enclosing this box after transformation by `m`.
    ///
    /// Projects the half extents through the absolute linear part
    /// (Arvo's method), which is exact for the 8 transformed corners.
    #[must_use]
    pub fn transformed(&self, m: &Mat4) -> Self {
        let center = m.transform_point3(self.center());
        let h = self.half_extents();
        let ex = m.x_axis.truncate().abs() * h.x;
        let ey = m.y_axis.truncate().abs() * h.y;
        let ez = m.z_axis.truncate().abs() * h.z;
        let half = ex + ey + ez;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Whether `p` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}
