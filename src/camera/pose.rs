//! Damped orbit camera pose.
//!
//! The pose is stored as spherical coordinates around a focal point:
//! azimuth and elevation in degrees plus a *normalized* distance measured
//! in scene radii. The world-space eye position is derived every tick:
//!
//! ```text
//! position = focal_point + back(azim, elev) * distance * scene_radius / fov_factor
//! ```
//!
//! where `back` is the camera's local `+Z` axis and `fov_factor` is
//! `sin(fov / 2)`, so `distance == 1` frames the scene bounding sphere
//! exactly on the narrower viewport axis.
//!
//! Rotation is `Ry(azim) * Rx(elev)` applied to a camera looking down
//! `-Z`; positive elevation looks up, negative looks down on the scene.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4Swizzles};

use super::clipping::{fit_clipping_planes, ClipPlanes, MIN_SCENE_RADIUS};
use crate::options::CameraOptions;
use crate::picking::Ray;
use crate::scene::Aabb;
use crate::util::damped::{Damp, DampedValue};

/// Azimuth/elevation pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AzimElev {
    /// Rotation about world `+Y`.
    pub azim: f32,
    /// Rotation about the camera's local `+X`.
    pub elev: f32,
}

impl AzimElev {
    /// Construct from degrees.
    pub const fn new(azim: f32, elev: f32) -> Self {
        Self { azim, elev }
    }
}

impl Damp for AzimElev {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        Self {
            azim: self.azim.lerp_to(other.azim, t),
            elev: self.elev.lerp_to(other.elev, t),
        }
    }

    #[inline]
    fn max_delta(self, other: Self) -> f32 {
        self.azim
            .max_delta(other.azim)
            .max(self.elev.max_delta(other.elev))
    }
}

/// Canonical axis-aligned views; selecting one switches to orthographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAxis {
    /// Looking down `-Z`.
    Front,
    /// Looking down `+Z`.
    Back,
    /// Looking down `+X`.
    Left,
    /// Looking down `-X`.
    Right,
    /// Looking down `-Y`.
    Top,
    /// Looking down `+Y`.
    Bottom,
}

impl ViewAxis {
    /// Azimuth/elevation that realizes this view.
    #[must_use]
    pub fn azim_elev(self) -> AzimElev {
        match self {
            Self::Front => AzimElev::new(0.0, 0.0),
            Self::Back => AzimElev::new(180.0, 0.0),
            Self::Left => AzimElev::new(270.0, 0.0),
            Self::Right => AzimElev::new(90.0, 0.0),
            Self::Top => AzimElev::new(0.0, -90.0),
            Self::Bottom => AzimElev::new(0.0, 90.0),
        }
    }
}

/// Elevation, zoom and damping limits copied out of [`CameraOptions`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct PoseLimits {
    min_elev: f32,
    max_elev: f32,
    min_zoom: f32,
    max_zoom: f32,
}

/// Damped orbit/pan/zoom camera state.
#[derive(Debug, Clone)]
pub struct CameraPose {
    focal_point: DampedValue<Vec3>,
    azim_elev: DampedValue<AzimElev>,
    distance: DampedValue<f32>,
    /// Field of view in degrees, on the narrower viewport axis.
    fov: f32,
    aspect: f32,
    ortho: bool,
    clip: ClipPlanes,
    scene_center: Vec3,
    scene_radius: f32,
    limits: PoseLimits,
    /// Base half-life in seconds; setters scale it by their factor.
    damping: f32,
}

impl CameraPose {
    /// Create a settled pose looking at the origin of a unit scene.
    pub fn new(options: &CameraOptions) -> Self {
        let limits = PoseLimits {
            min_elev: options.min_elev.min(options.max_elev),
            max_elev: options.max_elev.max(options.min_elev),
            min_zoom: options.min_zoom.min(options.max_zoom),
            max_zoom: options.max_zoom.max(options.min_zoom),
        };
        let mut pose = Self {
            focal_point: DampedValue::new(Vec3::ZERO),
            azim_elev: DampedValue::new(AzimElev::new(30.0, -20.0)),
            distance: DampedValue::new(1.0_f32.clamp(limits.min_zoom, limits.max_zoom)),
            fov: options.fov.clamp(1.0, 179.0),
            aspect: 1.0,
            ortho: false,
            clip: ClipPlanes { near: 0.1, far: 100.0 },
            scene_center: Vec3::ZERO,
            scene_radius: 1.0,
            limits,
            damping: options.damping.max(0.0),
        };
        pose.refresh_clip_planes();
        pose
    }

    /// Apply changed options. Tweens in flight keep their targets and are
    /// only re-clamped to the new limits.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        let fresh = Self::new(options);
        self.limits = fresh.limits;
        self.fov = fresh.fov;
        self.damping = fresh.damping;
        let PoseLimits { min_elev, max_elev, min_zoom, max_zoom } = self.limits;
        self.azim_elev
            .rebase(|ae| AzimElev::new(ae.azim, ae.elev.clamp(min_elev, max_elev)));
        self.distance.rebase(|d| d.clamp(min_zoom, max_zoom));
        self.refresh_clip_planes();
    }

    // ── Setters ─────────────────────────────────────────────────────────

    /// Orbit to `azim`/`elev` degrees. Azimuth is wrapped into `[0, 360)`
    /// and the damped path never exceeds 180°. Switches to perspective.
    pub fn set_azim_elev(&mut self, azim: f32, elev: f32, damping_factor: f32) {
        self.set_azim_elev_keep_projection(azim, elev, damping_factor);
        self.ortho = false;
    }

    fn set_azim_elev_keep_projection(&mut self, azim: f32, elev: f32, damping_factor: f32) {
        let mut azim = azim.rem_euclid(360.0);
        if azim >= 360.0 {
            azim = 0.0;
        }
        let elev = elev.clamp(self.limits.min_elev, self.limits.max_elev);

        self.azim_elev
            .goto(AzimElev::new(azim, elev), self.half_life(damping_factor));

        let source = self.azim_elev.source().azim;
        let shift = if source - azim < -180.0 {
            360.0
        } else if source - azim > 180.0 {
            -360.0
        } else {
            0.0
        };
        if shift != 0.0 {
            self.azim_elev.rebase_source(|ae| AzimElev::new(ae.azim + shift, ae.elev));
        }
    }

    /// Zoom to normalized `distance`, clamped to the zoom limits.
    pub fn set_distance(&mut self, distance: f32, damping_factor: f32) {
        let d = if distance.is_nan() {
            self.distance.target()
        } else {
            distance.clamp(self.limits.min_zoom, self.limits.max_zoom)
        };
        self.distance.goto(d, self.half_life(damping_factor));
    }

    /// Move the orbit center to `point`.
    pub fn set_focal_point(&mut self, point: Vec3, damping_factor: f32) {
        self.focal_point.goto(point, self.half_life(damping_factor));
    }

    /// Look from `position` at `target`. Azimuth, elevation and distance
    /// are derived from the look vector and routed through the setters.
    pub fn set_pose(&mut self, position: Vec3, target: Vec3, damping_factor: f32) {
        let look = target - position;
        let len = look.length();
        self.set_focal_point(target, damping_factor);
        if len.is_nan() || len <= f32::EPSILON {
            return;
        }
        let azim = (-look.x).atan2(-look.z).to_degrees();
        let elev = (look.y / len).clamp(-1.0, 1.0).asin().to_degrees();
        self.set_azim_elev(azim, elev, damping_factor);
        self.set_distance(len * self.fov_factor() / self.scene_radius, damping_factor);
    }

    /// Switch between orthographic and perspective projection.
    pub fn set_ortho(&mut self, ortho: bool) {
        self.ortho = ortho;
    }

    /// Snap-orbit to an axis view and switch to orthographic.
    pub fn align_to_axis(&mut self, axis: ViewAxis, damping_factor: f32) {
        let ae = axis.azim_elev();
        self.set_azim_elev_keep_projection(ae.azim, ae.elev, damping_factor);
        self.ortho = true;
    }

    /// Update the viewport aspect ratio (width / height).
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// React to the scene bound changing. The normalized distance is
    /// rescaled so the world-space eye distance is unchanged.
    pub fn on_scene_bound_changed(&mut self, bound: &Aabb) {
        let new_radius = bound.radius().max(MIN_SCENE_RADIUS);
        let new_radius = if new_radius.is_finite() { new_radius } else { self.scene_radius };
        let ratio = self.scene_radius / new_radius;
        let PoseLimits { min_zoom, max_zoom, .. } = self.limits;
        self.distance.rebase(|d| (d * ratio).clamp(min_zoom, max_zoom));
        self.scene_radius = new_radius;
        self.scene_center = bound.center();
        self.refresh_clip_planes();
    }

    /// Translate the focal point along the camera's local X (`right`) and
    /// view (`forward`) axes, in scene radii.
    pub fn fly(&mut self, right: f32, forward: f32) {
        let rot = self.rotation_of(self.azim_elev.target());
        let delta = (rot * Vec3::X * right + rot * Vec3::NEG_Z * forward) * self.scene_radius;
        let target = self.focal_point.target() + delta;
        self.focal_point.goto(target, self.damping);
    }

    /// Advance every tween and refit the clipping planes.
    pub fn advance(&mut self, dt: f32) {
        self.focal_point.advance(dt);
        self.azim_elev.advance(dt);
        self.distance.advance(dt);
        self.refresh_clip_planes();
    }

    fn refresh_clip_planes(&mut self) {
        self.clip = fit_clipping_planes(
            self.position(),
            self.look_direction(),
            self.scene_center,
            self.scene_radius,
        );
        log::trace!("clip planes near={} far={}", self.clip.near, self.clip.far);
    }

    fn half_life(&self, damping_factor: f32) -> f32 {
        (self.damping * damping_factor).max(0.0)
    }

    // ── Derived state ───────────────────────────────────────────────────

    /// `sin(fov / 2)`: world distance at which a unit sphere fills the
    /// narrower viewport axis.
    #[must_use]
    pub fn fov_factor(&self) -> f32 {
        (self.fov.to_radians() * 0.5).sin()
    }

    /// Vertical field of view in radians for the current aspect ratio.
    #[must_use]
    pub fn vertical_fov(&self) -> f32 {
        let fov = self.fov.to_radians();
        if self.aspect >= 1.0 {
            fov
        } else {
            2.0 * ((fov * 0.5).tan() / self.aspect).atan()
        }
    }

    fn rotation_of(&self, ae: AzimElev) -> Quat {
        Quat::from_euler(EulerRot::YXZ, ae.azim.to_radians(), ae.elev.to_radians(), 0.0)
    }

    /// Current camera orientation.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation_of(self.azim_elev.value())
    }

    /// Unit view direction (camera `-Z`).
    #[must_use]
    pub fn look_direction(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Camera right vector (camera `+X`).
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Camera up vector (camera `+Y`).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// World-space eye distance from the focal point.
    #[must_use]
    pub fn world_distance(&self) -> f32 {
        self.distance.value() * self.scene_radius / self.fov_factor()
    }

    /// World-space eye position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.focal_point.value() + self.rotation() * Vec3::Z * self.world_distance()
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position()).inverse()
    }

    /// View-to-clip matrix with `[0, 1]` depth (wgpu convention).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        let fovy = self.vertical_fov();
        if self.ortho {
            let half_h = self.world_distance() * (fovy * 0.5).tan();
            let half_w = half_h * self.aspect;
            Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.clip.near, self.clip.far)
        } else {
            Mat4::perspective_rh(fovy, self.aspect, self.clip.near, self.clip.far)
        }
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray through pixel (`x`, `y`) of a `width` × `height` viewport,
    /// from the near plane toward the far plane. Orthographic projection
    /// yields parallel rays with per-pixel origins.
    #[must_use]
    pub fn screen_ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let (near, far) = self.screen_segment(x, y, width, height);
        Ray::between(near, far)
    }

    /// Near- and far-plane world points under pixel (`x`, `y`).
    #[must_use]
    pub fn screen_segment(&self, x: f32, y: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let ndc = Self::pixel_to_ndc(x, y, width, height);
        let inv = self.view_projection().inverse();
        (
            inv.project_point3(ndc.extend(0.0)),
            inv.project_point3(ndc.extend(1.0)),
        )
    }

    /// Project `point` to pixel coordinates. Returns the pixel and the
    /// view depth, or `None` when the point is not in front of the camera.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec3, width: f32, height: f32) -> Option<(Vec2, f32)> {
        let depth = (point - self.position()).dot(self.look_direction());
        if depth.is_nan() || depth <= 0.0 {
            return None;
        }
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w.is_nan() || clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        let pixel = Vec2::new(
            (ndc.x + 1.0) * 0.5 * width.max(1.0),
            (1.0 - ndc.y) * 0.5 * height.max(1.0),
        );
        Some((pixel, depth))
    }

    /// World-space focal-point offset that keeps the point under the
    /// cursor fixed while dragging from (`x - dx`, `y - dy`) to (`x`, `y`).
    #[must_use]
    pub fn pan_offset(&self, x: f32, y: f32, dx: f32, dy: f32, width: f32, height: f32) -> Vec3 {
        let focal = self.focal_point.value();
        let normal = self.look_direction();
        let from = self.screen_ray(x - dx, y - dy, width, height);
        let to = self.screen_ray(x, y, width, height);
        match (from.intersect_plane(focal, normal), to.intersect_plane(focal, normal)) {
            (Some(t0), Some(t1)) => from.at(t0) - to.at(t1),
            _ => {
                let wpp = self.world_units_per_pixel(height);
                (self.up() * dy - self.right() * dx) * wpp
            }
        }
    }

    /// World units covered by one pixel at the focal distance.
    #[must_use]
    pub fn world_units_per_pixel(&self, height: f32) -> f32 {
        2.0 * self.world_distance() * (self.vertical_fov() * 0.5).tan() / height.max(1.0)
    }

    fn pixel_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
        let w = width.max(1.0);
        let h = height.max(1.0);
        Vec2::new(2.0 * x / w - 1.0, 1.0 - 2.0 * y / h)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Focal-point tween.
    #[must_use]
    pub fn focal_point(&self) -> &DampedValue<Vec3> {
        &self.focal_point
    }

    /// Azimuth/elevation tween.
    #[must_use]
    pub fn azim_elev(&self) -> &DampedValue<AzimElev> {
        &self.azim_elev
    }

    /// Normalized distance tween.
    #[must_use]
    pub fn distance(&self) -> &DampedValue<f32> {
        &self.distance
    }

    /// Whether the projection is orthographic.
    #[must_use]
    pub fn ortho(&self) -> bool {
        self.ortho
    }

    /// Field of view in degrees.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Viewport aspect ratio.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Current clipping planes.
    #[must_use]
    pub fn clip_planes(&self) -> ClipPlanes {
        self.clip
    }

    /// Radius of the scene bounding sphere.
    #[must_use]
    pub fn scene_radius(&self) -> f32 {
        self.scene_radius
    }

    /// Center of the scene bound.
    #[must_use]
    pub fn scene_center(&self) -> Vec3 {
        self.scene_center
    }
}
