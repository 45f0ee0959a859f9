use glam::Vec2;

use super::event::{Modifiers, MouseButton};

/// Camera operation a pointer drag maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragGesture {
    /// Orbit around the focal point.
    Orbit,
    /// Pan the focal point.
    Pan,
    /// Dolly toward/away from the focal point.
    Zoom,
}

impl DragGesture {
    /// Gesture for a drag with `button` under `mods`. The right button
    /// pans, or orbits with shift/ctrl, or zooms with alt/meta.
    pub fn for_button(button: MouseButton, mods: Modifiers) -> Self {
        match button {
            MouseButton::Left => Self::Orbit,
            MouseButton::Middle => Self::Zoom,
            MouseButton::Right if mods.shift || mods.ctrl => Self::Orbit,
            MouseButton::Right if mods.alt || mods.meta => Self::Zoom,
            MouseButton::Right => Self::Pan,
        }
    }
}

/// Result of releasing a pointer button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickResult {
    /// No pick (drag, mismatched button, release without press).
    NoAction,
    /// Primary-button click at a pixel.
    Click(Vec2),
}

/// Tracks cursor position, the held button and click-vs-drag intent.
#[derive(Debug, Default)]
pub(crate) struct PointerState {
    pub position: Vec2,
    /// Button held and where it went down.
    pressed: Option<(MouseButton, Vec2)>,
    is_dragging: bool,
}

impl PointerState {
    /// Record a press. A second button while one is held is ignored.
    pub fn handle_down(&mut self, button: MouseButton, pos: Vec2) {
        self.position = pos;
        if self.pressed.is_none() {
            self.pressed = Some((button, pos));
            self.is_dragging = false;
        }
    }

    /// Update the cursor. Returns the held button and the delta since the
    /// previous position, or `None` when nothing is held.
    pub fn handle_move(&mut self, pos: Vec2, drag_threshold: f32) -> Option<(MouseButton, Vec2)> {
        let delta = pos - self.position;
        self.position = pos;
        let (button, down) = self.pressed?;
        if pos.distance(down) > drag_threshold {
            self.is_dragging = true;
        }
        Some((button, delta))
    }

    /// Process a release and decide whether it was a click. A release
    /// past `drag_threshold` from the press counts as a drag even when no
    /// move event arrived in between.
    pub fn handle_up(&mut self, button: MouseButton, pos: Vec2, drag_threshold: f32) -> ClickResult {
        self.position = pos;
        let down = match self.pressed {
            Some((held, down)) if held == button => down,
            _ => return ClickResult::NoAction,
        };
        self.pressed = None;
        let was_dragging = std::mem::take(&mut self.is_dragging);
        if was_dragging || pos.distance(down) > drag_threshold || button != MouseButton::Left {
            ClickResult::NoAction
        } else {
            ClickResult::Click(pos)
        }
    }

    /// Whether the current press has moved past the drag threshold.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_motion_is_still_a_click() {
        let mut p = PointerState::default();
        p.handle_down(MouseButton::Left, Vec2::new(10.0, 10.0));
        let _ = p.handle_move(Vec2::new(13.0, 14.0), 5.0);
        assert!(!p.is_dragging());
        assert_eq!(
            p.handle_up(MouseButton::Left, Vec2::new(13.0, 14.0), 5.0),
            ClickResult::Click(Vec2::new(13.0, 14.0))
        );
    }

    #[test]
    fn motion_past_threshold_suppresses_click() {
        let mut p = PointerState::default();
        p.handle_down(MouseButton::Left, Vec2::ZERO);
        let _ = p.handle_move(Vec2::new(6.0, 0.0), 5.0);
        // Returning to the start does not undo the drag.
        let _ = p.handle_move(Vec2::ZERO, 5.0);
        assert_eq!(p.handle_up(MouseButton::Left, Vec2::ZERO, 5.0), ClickResult::NoAction);
    }

    #[test]
    fn distant_release_without_move_is_a_drag() {
        let mut p = PointerState::default();
        p.handle_down(MouseButton::Left, Vec2::ZERO);
        assert_eq!(
            p.handle_up(MouseButton::Left, Vec2::new(80.0, 60.0), 5.0),
            ClickResult::NoAction
        );
        p.handle_down(MouseButton::Left, Vec2::ZERO);
        assert_eq!(
            p.handle_up(MouseButton::Left, Vec2::new(3.0, 4.0), 5.0),
            ClickResult::Click(Vec2::new(3.0, 4.0))
        );
    }

    #[test]
    fn unmatched_release_is_ignored() {
        let mut p = PointerState::default();
        assert_eq!(p.handle_up(MouseButton::Left, Vec2::ZERO, 5.0), ClickResult::NoAction);
        p.handle_down(MouseButton::Right, Vec2::ZERO);
        assert_eq!(p.handle_up(MouseButton::Left, Vec2::ZERO, 5.0), ClickResult::NoAction);
        assert_eq!(p.handle_up(MouseButton::Right, Vec2::ZERO, 5.0), ClickResult::NoAction);
    }

    #[test]
    fn right_button_gestures() {
        let none = Modifiers::default();
        let shift = Modifiers { shift: true, ..none };
        let ctrl = Modifiers { ctrl: true, ..none };
        let alt = Modifiers { alt: true, ..none };
        let meta = Modifiers { meta: true, ..none };
        assert_eq!(DragGesture::for_button(MouseButton::Left, alt), DragGesture::Orbit);
        assert_eq!(DragGesture::for_button(MouseButton::Middle, none), DragGesture::Zoom);
        assert_eq!(DragGesture::for_button(MouseButton::Right, none), DragGesture::Pan);
        assert_eq!(DragGesture::for_button(MouseButton::Right, shift), DragGesture::Orbit);
        assert_eq!(DragGesture::for_button(MouseButton::Right, ctrl), DragGesture::Orbit);
        assert_eq!(DragGesture::for_button(MouseButton::Right, alt), DragGesture::Zoom);
        assert_eq!(DragGesture::for_button(MouseButton::Right, meta), DragGesture::Zoom);
    }
}
