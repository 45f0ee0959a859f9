//! The viewport's camera vocabulary.
//!
//! Every camera-driving operation, whether produced by a mouse gesture,
//! touch, wheel, key press or programmatic call, is a `CameraCommand`.
//! Consumers pass them to [`Viewport::execute`](super::Viewport::execute).

use crate::input::KeyAction;

/// A single camera operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Orbit by a cursor delta in pixels.
    Orbit {
        /// Horizontal delta (positive = right).
        dx: f32,
        /// Vertical delta (positive = down).
        dy: f32,
    },
    /// Pan so the point under (`x`, `y`) follows a cursor delta.
    Pan {
        /// Current cursor x in pixels.
        x: f32,
        /// Current cursor y in pixels.
        y: f32,
        /// Horizontal delta in pixels.
        dx: f32,
        /// Vertical delta in pixels.
        dy: f32,
    },
    /// Zoom by `amount` (positive = closer).
    Zoom {
        /// Zoom units; scaled by the zoom sensitivity.
        amount: f32,
    },
    /// Fly the focal point, in scene radii.
    Fly {
        /// Along camera right.
        right: f32,
        /// Along the view direction.
        forward: f32,
    },
    /// Run the pick cascade at a pixel.
    Pick {
        /// Pixel x.
        x: f32,
        /// Pixel y.
        y: f32,
    },
    /// A discrete key-bound action.
    Action(KeyAction),
}
