//! Near/far plane fitting against the scene bounding sphere.
//!
//! Keeps the depth range tight around the content without clipping it,
//! whatever the scale of the model.

use glam::Vec3;

/// Smallest near plane ever produced.
pub const MIN_NEAR: f32 = 0.001;

/// Floor for degenerate (zero-size) scene radii.
pub const MIN_SCENE_RADIUS: f32 = 1e-4;

/// A near/far plane pair with `MIN_NEAR <= near < far`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlanes {
    /// Near plane distance.
    pub near: f32,
    /// Far plane distance.
    pub far: f32,
}

/// Fit clipping planes for a camera at `position` looking along `look`
/// (unit) at a scene bounded by a sphere of `radius` around `center`.
pub fn fit_clipping_planes(
    position: Vec3,
    look: Vec3,
    center: Vec3,
    radius: f32,
) -> ClipPlanes {
    let r = if radius > MIN_SCENE_RADIUS && radius.is_finite() {
        radius
    } else {
        MIN_SCENE_RADIUS
    };
    let dist = (center - position).dot(look);

    let (near, far) = if dist > 0.0 {
        let far = (4.0 * r).max(dist + 2.0 * r);
        let near = if dist < r {
            r / 10_000.0
        } else {
            (dist - r).min(r / 100.0)
        };
        (near, far)
    } else {
        // Bound is behind the camera (or the inputs are NaN).
        (r / 10_000.0, 6.0 * r)
    };

    let near = near.max(MIN_NEAR);
    let far = if far.is_finite() { far } else { 6.0 * r };
    let near = if near < far { near } else { far / 1000.0 };
    // far / 1000 can fall under the floor for tiny scenes; far is then
    // raised so the ordering still holds.
    let far = far.max(near * 2.0).max(MIN_NEAR * 2.0);
    let near = near.max(MIN_NEAR);

    ClipPlanes { near, far }
}
