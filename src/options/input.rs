use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Pointer, wheel and touch translation thresholds.
pub struct InputOptions {
    /// Pointer travel in pixels after which a press becomes a drag and no
    /// longer triggers a pick on release.
    #[schemars(title = "Drag Threshold", range(min = 1.0, max = 20.0), extend("step" = 1.0))]
    pub drag_threshold: f32,
    /// Minimum single-axis wheel delta (in pixels) treated as a notched
    /// mouse wheel rather than a trackpad scroll.
    #[schemars(skip)]
    pub wheel_notch_threshold: f32,
    /// Zoom units per pixel of wheel delta.
    #[schemars(skip)]
    pub wheel_zoom_scale: f32,
    /// Zoom units per pixel of middle/alt drag.
    #[schemars(skip)]
    pub drag_zoom_scale: f32,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            drag_threshold: 5.0,
            wheel_notch_threshold: 50.0,
            wheel_zoom_scale: 0.002,
            drag_zoom_scale: 0.01,
        }
    }
}
