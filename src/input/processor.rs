//! Converts raw platform events into camera commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! drag detection, touches, held keys, modifiers) and the key-binding
//! map. It is the only thing that sits between raw window events and the
//! viewport's [`execute`](crate::engine::Viewport::execute) method.

use glam::Vec2;

use super::event::{InputEvent, Modifiers, WheelMode};
use super::keyboard::{KeyAction, KeyState};
use super::mouse::{ClickResult, DragGesture, PointerState};
use super::touch::{TouchGesture, TouchState};
use super::wheel::{self, WheelGesture};
use crate::engine::command::CameraCommand;
use crate::options::{InputOptions, KeybindingOptions, Options};

/// Fly speed multiplier while shift is held.
const FLY_FAST: f32 = 10.0;
/// Fly speed multiplier while ctrl, alt or meta is held.
const FLY_SLOW: f32 = 0.1;

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw window events into [`CameraCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// for cmd in input.handle_event(event) {
///     viewport.execute(cmd, &mut ctx);
/// }
/// for cmd in input.handle_key("ArrowUp", true) {
///     viewport.execute(cmd, &mut ctx);
/// }
///
/// // Once per frame, for held fly keys:
/// if let Some(cmd) = input.update(dt) {
///     viewport.execute(cmd, &mut ctx);
/// }
/// ```
pub struct InputProcessor {
    pointer: PointerState,
    touch: TouchState,
    keys: KeyState,
    modifiers: Modifiers,
    options: InputOptions,
    key_bindings: KeybindingOptions,
    /// Scene radii per second.
    fly_speed: f32,
}

impl InputProcessor {
    /// Create a processor configured from `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            pointer: PointerState::default(),
            touch: TouchState::default(),
            keys: KeyState::default(),
            modifiers: Modifiers::default(),
            options: options.input.clone(),
            key_bindings: options.keybindings.clone(),
            fly_speed: options.camera.fly_speed,
        }
    }

    /// Apply changed options without dropping in-progress gestures.
    pub fn apply_options(&mut self, options: &Options) {
        self.options = options.input.clone();
        self.key_bindings = options.keybindings.clone();
        self.fly_speed = options.camera.fly_speed;
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn pointer_pos(&self) -> Vec2 {
        self.pointer.position
    }

    /// Currently held modifiers.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether the current press or touch has turned into a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pointer.is_dragging() || self.touch.is_gesturing()
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Release every held key, e.g. when the window loses focus.
    pub fn release_all_keys(&mut self) {
        self.keys.clear();
    }

    /// Process a raw input event and return the resulting commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<CameraCommand> {
        match event {
            InputEvent::PointerDown { button, x, y } => {
                self.pointer.handle_down(button, Vec2::new(x, y));
                Vec::new()
            }
            InputEvent::PointerMove { x, y } => self.handle_pointer_move(Vec2::new(x, y)),
            InputEvent::PointerUp { button, x, y } => {
                match self
                    .pointer
                    .handle_up(button, Vec2::new(x, y), self.options.drag_threshold)
                {
                    ClickResult::Click(p) => vec![CameraCommand::Pick { x: p.x, y: p.y }],
                    ClickResult::NoAction => Vec::new(),
                }
            }
            InputEvent::Wheel { dx, dy, mode } => self.handle_wheel(dx, dy, mode),
            InputEvent::TouchStart { id, x, y } => {
                self.touch.handle_start(id, Vec2::new(x, y));
                Vec::new()
            }
            InputEvent::TouchMove { id, x, y } => self.handle_touch_move(id, Vec2::new(x, y)),
            InputEvent::TouchEnd { id } => self
                .touch
                .handle_end(id)
                .map(|p| CameraCommand::Pick { x: p.x, y: p.y })
                .into_iter()
                .collect(),
            InputEvent::ModifiersChanged(mods) => {
                self.modifiers = mods;
                Vec::new()
            }
        }
    }

    /// Process a key press or release. `key` uses the
    /// `winit::keyboard::KeyCode` debug format (`"KeyF"`, `"ArrowUp"`).
    ///
    /// Fly keys only change held state; their motion comes from
    /// [`update`](Self::update). Discrete actions fire once per press.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> Vec<CameraCommand> {
        let Some(action) = self.key_bindings.lookup(key) else {
            return Vec::new();
        };
        if !pressed {
            self.keys.release(action);
            return Vec::new();
        }
        let first_press = self.keys.press(action);
        if first_press && !action.is_fly() {
            vec![CameraCommand::Action(action)]
        } else {
            Vec::new()
        }
    }

    /// Per-frame fly motion from held keys, scaled by `dt` and the fly
    /// speed. Shift flies faster; ctrl, alt or meta slower.
    #[must_use]
    pub fn update(&self, dt: f32) -> Option<CameraCommand> {
        let (right, forward) = self.keys.fly_axes();
        if (right == 0.0 && forward == 0.0) || dt.is_nan() || dt <= 0.0 {
            return None;
        }
        let m = self.modifiers;
        let boost = if m.shift {
            FLY_FAST
        } else if m.ctrl || m.alt || m.meta {
            FLY_SLOW
        } else {
            1.0
        };
        let step = dt * self.fly_speed * boost;
        Some(CameraCommand::Fly {
            right: right * step,
            forward: forward * step,
        })
    }

    /// Whether any fly key is held.
    #[must_use]
    pub fn is_flying(&self) -> bool {
        self.keys.fly_axes() != (0.0, 0.0)
    }

    fn handle_pointer_move(&mut self, pos: Vec2) -> Vec<CameraCommand> {
        let Some((button, delta)) = self.pointer.handle_move(pos, self.options.drag_threshold)
        else {
            return Vec::new();
        };
        if delta == Vec2::ZERO {
            return Vec::new();
        }
        let cmd = match DragGesture::for_button(button, self.modifiers) {
            DragGesture::Orbit => CameraCommand::Orbit {
                dx: delta.x,
                dy: delta.y,
            },
            DragGesture::Pan => CameraCommand::Pan {
                x: pos.x,
                y: pos.y,
                dx: delta.x,
                dy: delta.y,
            },
            // Dragging up zooms in.
            DragGesture::Zoom => CameraCommand::Zoom {
                amount: -delta.y * self.options.drag_zoom_scale,
            },
        };
        vec![cmd]
    }

    fn handle_wheel(&mut self, dx: f32, dy: f32, mode: WheelMode) -> Vec<CameraCommand> {
        let (dx, dy) = wheel::to_pixels(dx, dy, mode);
        if dx == 0.0 && dy == 0.0 {
            return Vec::new();
        }
        let gesture = wheel::classify(dx, dy, mode, self.modifiers, self.options.wheel_notch_threshold);
        let pos = self.pointer.position;
        let cmd = match gesture {
            WheelGesture::Zoom => {
                let along = if dy == 0.0 { dx } else { dy };
                CameraCommand::Zoom {
                    amount: along * self.options.wheel_zoom_scale,
                }
            }
            WheelGesture::Pan => CameraCommand::Pan {
                x: pos.x,
                y: pos.y,
                dx,
                dy,
            },
            WheelGesture::Orbit => CameraCommand::Orbit { dx, dy },
        };
        vec![cmd]
    }

    fn handle_touch_move(&mut self, id: u64, pos: Vec2) -> Vec<CameraCommand> {
        match self.touch.handle_move(id, pos, self.options.drag_threshold) {
            Some(TouchGesture::Orbit(d)) => vec![CameraCommand::Orbit { dx: d.x, dy: d.y }],
            Some(TouchGesture::PanZoom {
                midpoint,
                delta,
                ratio,
            }) => {
                let mut cmds = Vec::with_capacity(2);
                if delta != Vec2::ZERO {
                    cmds.push(CameraCommand::Pan {
                        x: midpoint.x,
                        y: midpoint.y,
                        dx: delta.x,
                        dy: delta.y,
                    });
                }
                if ratio.is_finite() && ratio != 1.0 {
                    cmds.push(CameraCommand::Zoom {
                        amount: ratio - 1.0,
                    });
                }
                cmds
            }
            None => Vec::new(),
        }
    }

    /// Action bound to a key string, if any.
    #[must_use]
    pub fn lookup_key(&self, key: &str) -> Option<KeyAction> {
        self.key_bindings.lookup(key)
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;

    fn processor() -> InputProcessor {
        InputProcessor::default()
    }

    fn down(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown { button, x, y }
    }

    fn up(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp { button, x, y }
    }

    fn mv(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove { x, y }
    }

    #[test]
    fn left_drag_orbits_and_suppresses_pick() {
        let mut p = processor();
        assert!(p.handle_event(down(MouseButton::Left, 100.0, 100.0)).is_empty());
        assert_eq!(
            p.handle_event(mv(110.0, 95.0)),
            vec![CameraCommand::Orbit { dx: 10.0, dy: -5.0 }]
        );
        assert!(p.handle_event(up(MouseButton::Left, 110.0, 95.0)).is_empty());
    }

    #[test]
    fn click_within_threshold_picks() {
        let mut p = processor();
        let _ = p.handle_event(down(MouseButton::Left, 100.0, 100.0));
        let _ = p.handle_event(mv(102.0, 101.0));
        assert_eq!(
            p.handle_event(up(MouseButton::Left, 102.0, 101.0)),
            vec![CameraCommand::Pick { x: 102.0, y: 101.0 }]
        );
    }

    #[test]
    fn distant_release_without_move_does_not_pick() {
        let mut p = processor();
        let _ = p.handle_event(down(MouseButton::Left, 0.0, 0.0));
        assert!(p.handle_event(up(MouseButton::Left, 80.0, 60.0)).is_empty());
    }

    #[test]
    fn right_drag_pans_and_modifiers_override() {
        let mut p = processor();
        let _ = p.handle_event(down(MouseButton::Right, 0.0, 0.0));
        assert_eq!(
            p.handle_event(mv(4.0, 2.0)),
            vec![CameraCommand::Pan { x: 4.0, y: 2.0, dx: 4.0, dy: 2.0 }]
        );

        let _ = p.handle_event(InputEvent::ModifiersChanged(Modifiers { shift: true, ..Modifiers::default() }));
        assert!(matches!(p.handle_event(mv(5.0, 2.0))[..], [CameraCommand::Orbit { .. }]));

        let _ = p.handle_event(InputEvent::ModifiersChanged(Modifiers { alt: true, ..Modifiers::default() }));
        assert!(matches!(p.handle_event(mv(5.0, 0.0))[..], [CameraCommand::Zoom { amount }] if amount > 0.0));

        // Right clicks never pick.
        assert!(p.handle_event(up(MouseButton::Right, 5.0, 0.0)).is_empty());
    }

    #[test]
    fn middle_drag_zooms() {
        let mut p = processor();
        let _ = p.handle_event(down(MouseButton::Middle, 0.0, 50.0));
        let cmds = p.handle_event(mv(0.0, 40.0));
        assert!(matches!(cmds[..], [CameraCommand::Zoom { amount }] if amount > 0.0));
    }

    #[test]
    fn moves_without_press_do_nothing() {
        let mut p = processor();
        assert!(p.handle_event(mv(10.0, 10.0)).is_empty());
        assert_eq!(p.pointer_pos(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn wheel_routes_by_shape_and_modifiers() {
        let mut p = processor();
        let notch = InputEvent::Wheel { dx: 0.0, dy: 1.0, mode: WheelMode::Line };
        assert!(matches!(p.handle_event(notch)[..], [CameraCommand::Zoom { amount }] if amount > 0.0));

        let scroll = InputEvent::Wheel { dx: 3.0, dy: -2.0, mode: WheelMode::Pixel };
        assert_eq!(p.handle_event(scroll), vec![CameraCommand::Orbit { dx: 3.0, dy: -2.0 }]);

        let _ = p.handle_event(InputEvent::ModifiersChanged(Modifiers { shift: true, ..Modifiers::default() }));
        assert!(matches!(p.handle_event(scroll)[..], [CameraCommand::Pan { .. }]));

        let _ = p.handle_event(InputEvent::ModifiersChanged(Modifiers { ctrl: true, ..Modifiers::default() }));
        assert!(matches!(p.handle_event(scroll)[..], [CameraCommand::Zoom { .. }]));
    }

    #[test]
    fn two_finger_pinch_pans_and_zooms() {
        let mut p = processor();
        let _ = p.handle_event(InputEvent::TouchStart { id: 1, x: 0.0, y: 0.0 });
        let _ = p.handle_event(InputEvent::TouchStart { id: 2, x: 100.0, y: 0.0 });
        let cmds = p.handle_event(InputEvent::TouchMove { id: 2, x: 200.0, y: 0.0 });
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[0], CameraCommand::Pan { dx, .. } if dx == 50.0));
        assert!(matches!(cmds[1], CameraCommand::Zoom { amount } if amount > 0.0));
    }

    #[test]
    fn touch_drag_reports_dragging() {
        let mut p = processor();
        let _ = p.handle_event(InputEvent::TouchStart { id: 3, x: 0.0, y: 0.0 });
        assert!(!p.is_dragging());
        let _ = p.handle_event(InputEvent::TouchMove { id: 3, x: 40.0, y: 0.0 });
        assert!(p.is_dragging());
        assert!(p.handle_event(InputEvent::TouchEnd { id: 3 }).is_empty());
        assert!(!p.is_dragging());
    }

    #[test]
    fn touch_tap_picks() {
        let mut p = processor();
        let _ = p.handle_event(InputEvent::TouchStart { id: 7, x: 30.0, y: 40.0 });
        assert_eq!(
            p.handle_event(InputEvent::TouchEnd { id: 7 }),
            vec![CameraCommand::Pick { x: 30.0, y: 40.0 }]
        );
        // Duplicate end is ignored.
        assert!(p.handle_event(InputEvent::TouchEnd { id: 7 }).is_empty());
    }

    #[test]
    fn fly_keys_scale_with_time_and_modifiers() {
        let mut p = processor();
        assert!(p.handle_key("ArrowUp", true).is_empty());
        // Auto-repeat does not double the speed.
        assert!(p.handle_key("ArrowUp", true).is_empty());
        assert_eq!(p.update(0.5), Some(CameraCommand::Fly { right: 0.0, forward: 0.5 }));

        let _ = p.handle_event(InputEvent::ModifiersChanged(Modifiers { shift: true, ..Modifiers::default() }));
        assert_eq!(p.update(0.5), Some(CameraCommand::Fly { right: 0.0, forward: 5.0 }));

        let _ = p.handle_event(InputEvent::ModifiersChanged(Modifiers { meta: true, ..Modifiers::default() }));
        match p.update(1.0) {
            Some(CameraCommand::Fly { forward, .. }) => assert!((forward - 0.1).abs() < 1e-6),
            other => unreachable!("unexpected {other:?}"),
        }

        let _ = p.handle_key("ArrowUp", false);
        assert_eq!(p.update(0.5), None);
        assert!(!p.is_flying());
    }

    #[test]
    fn discrete_actions_fire_once_per_press() {
        let mut p = processor();
        assert_eq!(
            p.handle_key("KeyO", true),
            vec![CameraCommand::Action(KeyAction::ToggleOrtho)]
        );
        assert!(p.handle_key("KeyO", true).is_empty());
        let _ = p.handle_key("KeyO", false);
        assert_eq!(p.handle_key("KeyO", true).len(), 1);
        assert!(p.handle_key("KeyZ", true).is_empty());
    }
}
