//! Rays and the intersection tests used by the pick cascade.
//!
//! Every test reports a hit as `Some(t)` with `t >= 0` along a unit-length
//! direction. Comparisons are written so that NaN never reports a hit.

use glam::Vec3;

use crate::scene::Aabb;

/// Directions shorter than this are treated as degenerate.
const MIN_DIRECTION_LENGTH: f32 = 1e-12;

/// Parallel-plane cutoff for the manual slab and plane tests.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A half-line starting at `origin` along unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point (on the near plane for camera rays).
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction`. A zero-length direction falls
    /// back to `-Z` instead of producing NaNs.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = if direction.length_squared() > MIN_DIRECTION_LENGTH {
            direction.normalize()
        } else {
            Vec3::NEG_Z
        };
        Self { origin, direction }
    }

    /// Ray from `from` toward `to`.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }

    /// Point at parameter `t`.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Entry distance into `aabb` using reciprocal-direction slabs.
    ///
    /// Returns `Some(0.0)` when the origin is inside the box.
    #[must_use]
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let inv = self.direction.recip();
        let t1 = (aabb.min - self.origin) * inv;
        let t2 = (aabb.max - self.origin) * inv;
        // 0 * inf on an axis-parallel ray through a face plane
        if t1.is_nan() || t2.is_nan() {
            return None;
        }
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();
        if t_near <= t_far && t_far >= 0.0 {
            Some(t_near.max(0.0))
        } else {
            None
        }
    }

    /// Entry distance into `aabb` using an explicit per-axis slab walk,
    /// with the box grown by `tolerance` on every side.
    ///
    /// Handles axis-parallel rays without relying on infinities, so rays
    /// that run exactly along a face still register.
    #[must_use]
    pub fn intersect_aabb_slab(&self, aabb: &Aabb, tolerance: f32) -> Option<f32> {
        let min = aabb.min - Vec3::splat(tolerance);
        let max = aabb.max + Vec3::splat(tolerance);
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.direction[axis];
            if d.abs() < PARALLEL_EPSILON {
                if o.is_nan() || o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let mut t0 = (min[axis] - o) / d;
            let mut t1 = (max[axis] - o) / d;
            if t0.is_nan() || t1.is_nan() {
                return None;
            }
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_near {
                t_near = t0;
            }
            if t1 < t_far {
                t_far = t1;
            }
            if t_near > t_far {
                return None;
            }
        }

        (t_far >= 0.0).then_some(t_near.max(0.0))
    }

    /// Distance to the plane through `point` with `normal`, if in front.
    #[must_use]
    pub fn intersect_plane(&self, point: Vec3, normal: Vec3) -> Option<f32> {
        let denom = normal.dot(self.direction);
        if denom.is_nan() || denom.abs() <= PARALLEL_EPSILON {
            return None;
        }
        let t = normal.dot(point - self.origin) / denom;
        (t >= 0.0).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn ray_hits_box_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(ray.intersect_aabb(&unit_box()), Some(4.0));
        assert_eq!(ray.intersect_aabb_slab(&unit_box(), 0.0), Some(4.0));
    }

    #[test]
    fn ray_misses_box_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(ray.intersect_aabb(&unit_box()), None);
        assert_eq!(ray.intersect_aabb_slab(&unit_box(), 0.0), None);
    }

    #[test]
    fn origin_inside_reports_zero() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.intersect_aabb(&unit_box()), Some(0.0));
        assert_eq!(ray.intersect_aabb_slab(&unit_box(), 0.0), Some(0.0));
    }

    #[test]
    fn face_grazing_ray_is_caught_by_slab_walk() {
        // Runs exactly along the y = 1 face: 0 * inf in the reciprocal
        // form yields NaN, the explicit walk still accepts it.
        let ray = Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X);
        assert_eq!(ray.intersect_aabb(&unit_box()), None);
        let t = ray.intersect_aabb_slab(&unit_box(), 1e-4).unwrap();
        assert!((t - 4.0).abs() < 1e-3);
    }

    #[test]
    fn nan_origin_never_hits() {
        let ray = Ray::new(Vec3::new(f32::NAN, 0.0, 5.0), Vec3::NEG_Z);
        assert_eq!(ray.intersect_aabb(&unit_box()), None);
        assert_eq!(ray.intersect_aabb_slab(&unit_box(), 0.0), None);
        assert_eq!(ray.intersect_plane(Vec3::ZERO, Vec3::Z), None);
    }

    #[test]
    fn zero_direction_is_floored() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(ray.direction, Vec3::NEG_Z);
    }

    #[test]
    fn plane_intersection() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 10.0), Vec3::NEG_Z);
        let t = ray.intersect_plane(Vec3::new(0.0, 0.0, 3.0), Vec3::Z).unwrap();
        assert!((t - 7.0).abs() < 1e-6);
        assert!((ray.at(t) - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        assert_eq!(ray.intersect_plane(Vec3::ZERO, Vec3::X), None);
    }
}
