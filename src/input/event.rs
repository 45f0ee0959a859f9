/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`CameraCommand`](crate::engine::CameraCommand)
/// values. Key presses go through
/// [`InputProcessor::handle_key`](super::InputProcessor::handle_key)
/// instead, since they carry a key string.
///
/// # Example
///
/// ```ignore
/// for cmd in input.handle_event(InputEvent::PointerMove { x: 100.0, y: 200.0 }) {
///     viewport.execute(cmd, &mut ctx);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed at a position.
    PointerDown {
        /// Which button.
        button: MouseButton,
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Cursor moved to absolute screen position.
    PointerMove {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button released at a position.
    PointerUp {
        /// Which button.
        button: MouseButton,
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Wheel or trackpad scroll.
    Wheel {
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta (positive = away from the user).
        dy: f32,
        /// Unit of the deltas.
        mode: WheelMode,
    },
    /// Finger touched down.
    TouchStart {
        /// Platform touch identifier.
        id: u64,
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Finger moved.
    TouchMove {
        /// Platform touch identifier.
        id: u64,
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Finger lifted or the touch was cancelled.
    TouchEnd {
        /// Platform touch identifier.
        id: u64,
    },
    /// Modifier key state changed.
    ModifiersChanged(Modifiers),
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Unit of a wheel delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelMode {
    /// Pixel deltas (trackpads, smooth-scrolling mice).
    #[default]
    Pixel,
    /// Line deltas (notched wheels).
    Line,
    /// Page deltas.
    Page,
}

/// Held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Shift.
    pub shift: bool,
    /// Control.
    pub ctrl: bool,
    /// Alt / Option.
    pub alt: bool,
    /// Meta / Command / Super.
    pub meta: bool,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::keyboard::ModifiersState> for Modifiers {
    fn from(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseScrollDelta> for InputEvent {
    #[allow(clippy::cast_possible_truncation)]
    fn from(delta: winit::event::MouseScrollDelta) -> Self {
        match delta {
            winit::event::MouseScrollDelta::LineDelta(dx, dy) => Self::Wheel {
                dx,
                dy,
                mode: WheelMode::Line,
            },
            winit::event::MouseScrollDelta::PixelDelta(pos) => Self::Wheel {
                dx: pos.x as f32,
                dy: pos.y as f32,
                mode: WheelMode::Pixel,
            },
        }
    }
}
