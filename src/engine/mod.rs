//! The viewport adapter.
//!
//! [`Viewport`] ties the camera pose, the input translator and the pick
//! cascade together and queues [`ViewportEvent`]s for the host. It owns no
//! GPU resources; hosts upload [`Viewport::pose`] through a
//! [`CameraController`](crate::camera::CameraController) each frame.
//!
//! A frame typically looks like:
//!
//! 1. feed window events to [`Viewport::handle_input`] and pass each
//!    returned command to [`Viewport::execute`]
//! 2. call [`Viewport::tick`] (or [`Viewport::update`] with a host clock)
//! 3. drain events and upload the camera uniform

pub mod command;
mod events;
mod execute;
mod options;

pub use command::CameraCommand;
pub use events::ViewportEvent;

use crate::camera::CameraPose;
use crate::input::InputProcessor;
use crate::options::{Options, Tonemapping};
use crate::picking::HitTestCascade;
use crate::scene::Aabb;
use crate::util::frame_timing::FrameClock;

/// Camera, input and picking state for one interactive viewport.
pub struct Viewport {
    pose: CameraPose,
    input: InputProcessor,
    cascade: HitTestCascade,
    options: Options,
    width: u32,
    height: u32,
    tonemapping: Tonemapping,
    clock: FrameClock,
    events: Vec<ViewportEvent>,
}

impl Viewport {
    /// Create a viewport of `width` × `height` pixels.
    pub fn new(options: Options, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let mut pose = CameraPose::new(&options.camera);
        pose.set_aspect(width as f32 / height as f32);
        pose.set_ortho(options.display.ortho);

        Self {
            input: InputProcessor::new(&options),
            cascade: HitTestCascade::new(&options.picking),
            tonemapping: options.display.tonemapping,
            pose,
            options,
            width,
            height,
            clock: FrameClock::new(),
            events: Vec::new(),
        }
    }

    // ── Frame ──

    /// Advance by wall-clock time since the previous tick. Returns the
    /// step in seconds.
    pub fn tick(&mut self) -> f32 {
        let dt = self.clock.tick();
        self.update(dt);
        dt
    }

    /// Advance by `dt` seconds: apply fly motion from held keys, then step
    /// every camera tween.
    pub fn update(&mut self, dt: f32) {
        if let Some(fly) = self.input.update(dt) {
            let _ = self.apply(fly);
        }
        self.pose.advance(dt);
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<ViewportEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Viewport state ──

    /// Resize the viewport. Zero dimensions are floored to one pixel.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!("viewport resized to {width}x{height}");
        self.width = width;
        self.height = height;
        self.pose.set_aspect(width as f32 / height as f32);
        self.events.push(ViewportEvent::Resize { width, height });
    }

    /// Switch projection. An event is queued only on change.
    pub fn set_ortho(&mut self, ortho: bool) {
        if self.pose.ortho() != ortho {
            self.pose.set_ortho(ortho);
            self.options.display.ortho = ortho;
            self.events.push(ViewportEvent::Ortho(ortho));
        }
    }

    /// Change the tonemapping operator. An event is queued only on change.
    pub fn set_tonemapping(&mut self, tonemapping: Tonemapping) {
        if self.tonemapping != tonemapping {
            self.tonemapping = tonemapping;
            self.options.display.tonemapping = tonemapping;
            self.events.push(ViewportEvent::Tonemapping(tonemapping));
        }
    }

    /// Forward a scene bound change to the pose.
    ///
    /// Takes `&mut self`, so it cannot run while a pick holds the viewport.
    pub fn on_scene_bound_changed(&mut self, bound: &Aabb) {
        self.pose.on_scene_bound_changed(bound);
    }

    /// Release held keys, e.g. when the window loses focus.
    pub fn release_all_keys(&mut self) {
        self.input.release_all_keys();
    }

    // ── Accessors ──

    /// Current camera pose.
    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Mutable camera pose for programmatic moves.
    pub fn pose_mut(&mut self) -> &mut CameraPose {
        &mut self.pose
    }

    /// Input translator state.
    #[must_use]
    pub fn input(&self) -> &InputProcessor {
        &self.input
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Current tonemapping operator.
    #[must_use]
    pub fn tonemapping(&self) -> Tonemapping {
        self.tonemapping
    }

    /// Smoothed frames per second measured by [`tick`](Self::tick).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    fn size_f32(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn resize_fires_only_on_change() {
        let mut vp = Viewport::new(Options::default(), 100, 100);
        vp.resize(100, 100);
        assert!(vp.drain_events().is_empty());

        vp.resize(200, 100);
        assert_eq!(
            vp.drain_events(),
            vec![ViewportEvent::Resize { width: 200, height: 100 }]
        );
        assert_eq!(vp.pose().aspect(), 2.0);
    }

    #[test]
    fn zero_size_is_floored() {
        let mut vp = Viewport::new(Options::default(), 0, 0);
        assert_eq!(vp.size(), (1, 1));
        vp.resize(0, 50);
        assert_eq!(vp.size(), (1, 50));
    }

    #[test]
    fn tonemapping_fires_only_on_change() {
        let mut vp = Viewport::new(Options::default(), 100, 100);
        vp.set_tonemapping(Tonemapping::Linear);
        assert!(vp.drain_events().is_empty());

        vp.set_tonemapping(Tonemapping::Filmic);
        vp.set_tonemapping(Tonemapping::Filmic);
        assert_eq!(
            vp.drain_events(),
            vec![ViewportEvent::Tonemapping(Tonemapping::Filmic)]
        );
        assert_eq!(vp.options().display.tonemapping, Tonemapping::Filmic);
    }

    #[test]
    fn set_ortho_fires_only_on_change() {
        let mut vp = Viewport::new(Options::default(), 100, 100);
        vp.set_ortho(false);
        vp.set_ortho(true);
        vp.set_ortho(true);
        assert_eq!(vp.drain_events(), vec![ViewportEvent::Ortho(true)]);
    }

    #[test]
    fn held_fly_key_moves_focal_point() {
        let mut opts = Options::default();
        opts.camera.damping = 0.0;
        let mut vp = Viewport::new(opts, 100, 100);
        let key = "ArrowUp";

        let _ = vp.handle_key(key, true);
        vp.update(0.5);
        let moved = vp.pose().focal_point().value();
        assert!(moved.length() > 0.0);

        let _ = vp.handle_key(key, false);
        vp.update(0.5);
        assert_eq!(vp.pose().focal_point().value(), moved);
    }

    #[test]
    fn scene_bound_change_keeps_eye_distance() {
        let mut opts = Options::default();
        opts.camera.damping = 0.0;
        let mut vp = Viewport::new(opts, 100, 100);
        vp.pose_mut().set_pose(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 0.0);
        vp.update(0.0);
        let before = vp.pose().position();

        vp.on_scene_bound_changed(&Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(3.0)));
        assert!((vp.pose().position() - before).length() < 1e-3);
    }
}
