//! Command execution and picking for [`Viewport`].

use super::command::CameraCommand;
use super::events::ViewportEvent;
use super::Viewport;
use crate::camera::ViewAxis;
use crate::input::{InputEvent, KeyAction};
use crate::picking::{PickContext, PickRequest, PickResult};

/// Smallest per-command distance multiplier, so one large zoom step can
/// never flip the sign of the distance.
const MIN_ZOOM_STEP: f32 = 0.1;

// ── Input ──

impl Viewport {
    /// Translate a raw input event into camera commands. The commands are
    /// not executed; pass them to [`execute`](Self::execute).
    pub fn handle_input(&mut self, event: InputEvent) -> Vec<CameraCommand> {
        self.input.handle_event(event)
    }

    /// Translate a key press or release into camera commands.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> Vec<CameraCommand> {
        self.input.handle_key(key, pressed)
    }
}

// ── Execution ──

impl Viewport {
    /// Execute a command. Picks run the hit-test cascade against `ctx`.
    pub fn execute(&mut self, command: CameraCommand, ctx: &mut PickContext<'_>) {
        if let Some(request) = self.apply(command) {
            let _ = self.pick_request(request, ctx);
        }
    }

    /// Execute a command that needs no scene access. A pick is not run;
    /// its request is returned for the host to resolve later with
    /// [`pick`](Self::pick).
    pub fn apply(&mut self, command: CameraCommand) -> Option<PickRequest> {
        let was_ortho = self.pose.ortho();
        let mut pick = None;

        match command {
            CameraCommand::Orbit { dx, dy } => self.orbit(dx, dy),
            CameraCommand::Pan { x, y, dx, dy } => self.pan(x, y, dx, dy),
            CameraCommand::Zoom { amount } => self.zoom(amount),
            CameraCommand::Fly { right, forward } => self.pose.fly(right, forward),
            CameraCommand::Pick { x, y } => pick = Some(self.pick_request_at(x, y)),
            CameraCommand::Action(action) => self.run_action(action),
        }

        self.notify_ortho_change(was_ortho);
        pick
    }

    fn orbit(&mut self, dx: f32, dy: f32) {
        let sens = self.options.camera.orbit_sensitivity;
        let ae = self.pose.azim_elev().target();
        self.pose
            .set_azim_elev(ae.azim - dx * sens, ae.elev - dy * sens, 1.0);
    }

    fn pan(&mut self, x: f32, y: f32, dx: f32, dy: f32) {
        let (w, h) = self.size_f32();
        let offset = self.pose.pan_offset(x, y, dx, dy, w, h)
            * self.options.camera.pan_sensitivity;
        if !offset.is_finite() {
            return;
        }
        let target = self.pose.focal_point().target() + offset;
        self.pose.set_focal_point(target, 1.0);
    }

    fn zoom(&mut self, amount: f32) {
        let factor = (1.0 - amount * self.options.camera.zoom_sensitivity)
            .clamp(MIN_ZOOM_STEP, 1.0 / MIN_ZOOM_STEP);
        if factor.is_nan() {
            return;
        }
        let distance = self.pose.distance().target() * factor;
        self.pose.set_distance(distance, 1.0);
    }

    fn run_action(&mut self, action: KeyAction) {
        let axis = match action {
            KeyAction::FrameScene => return self.frame_scene(),
            KeyAction::ToggleOrtho => {
                let ortho = !self.pose.ortho();
                self.pose.set_ortho(ortho);
                return;
            }
            KeyAction::ViewFront => ViewAxis::Front,
            KeyAction::ViewBack => ViewAxis::Back,
            KeyAction::ViewLeft => ViewAxis::Left,
            KeyAction::ViewRight => ViewAxis::Right,
            KeyAction::ViewTop => ViewAxis::Top,
            KeyAction::ViewBottom => ViewAxis::Bottom,
            KeyAction::FlyForward
            | KeyAction::FlyBackward
            | KeyAction::FlyLeft
            | KeyAction::FlyRight => return,
        };
        self.pose.align_to_axis(axis, 1.0);
    }

    /// Move the focal point to the scene center at unit distance.
    pub fn frame_scene(&mut self) {
        let was_ortho = self.pose.ortho();
        let center = self.pose.scene_center();
        self.pose.set_focal_point(center, 1.0);
        self.pose.set_distance(1.0, 1.0);
        self.notify_ortho_change(was_ortho);
    }

    fn notify_ortho_change(&mut self, was_ortho: bool) {
        let ortho = self.pose.ortho();
        if ortho != was_ortho {
            self.options.display.ortho = ortho;
            self.events.push(ViewportEvent::Ortho(ortho));
        }
    }
}

// ── Picking ──

impl Viewport {
    /// Pick at pixel (`x`, `y`). A hit moves the focal point there; hit or
    /// miss, a [`ViewportEvent::FocalPointPicked`] is queued.
    pub fn pick(&mut self, x: f32, y: f32, ctx: &mut PickContext<'_>) -> PickResult {
        let request = self.pick_request_at(x, y);
        self.pick_request(request, ctx)
    }

    fn pick_request(&mut self, request: PickRequest, ctx: &mut PickContext<'_>) -> PickResult {
        let result = self.cascade.pick(request, &self.pose, ctx);
        if let Some(point) = result.point() {
            self.pose.set_focal_point(point, 1.0);
        }
        self.events.push(ViewportEvent::from_pick(&result));
        result
    }

    fn pick_request_at(&self, x: f32, y: f32) -> PickRequest {
        let (w, h) = self.size_f32();
        PickRequest::new(x, y, w, h)
    }
}
