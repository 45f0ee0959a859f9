//! Input handling: event types, pointer/touch/wheel state machines, and
//! the input processor that converts raw window events into camera
//! commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions and held-key tracking.
pub mod keyboard;
/// Pointer click/drag tracking and button gesture mapping.
pub mod mouse;
/// Converts raw events into camera commands.
pub mod processor;
/// One- and two-finger touch tracking.
pub mod touch;
/// Wheel delta classification.
pub mod wheel;

pub use event::{InputEvent, Modifiers, MouseButton, WheelMode};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
