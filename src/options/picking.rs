use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::renderer::picking::PickMode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Picking", inline)]
#[serde(default)]
/// Hit-test cascade parameters.
pub struct PickingOptions {
    /// Pixel radius around the click within which a model's projected
    /// bound center is accepted by the screen-space fallback stage.
    #[schemars(title = "Fallback Radius", range(min = 0.0, max = 1000.0), extend("step" = 10.0))]
    pub screen_fallback_radius: f32,
    /// Padding applied to the manual slab test of aggregate bounds, as a
    /// fraction of the box size.
    #[schemars(skip)]
    pub slab_tolerance: f32,
    /// How splats are drawn into the index buffer.
    pub splat_mode: PickMode,
    /// Query the physics collaborator (when one is attached).
    pub use_physics: bool,
}

impl Default for PickingOptions {
    fn default() -> Self {
        Self {
            screen_fallback_radius: 200.0,
            slab_tolerance: 1e-4,
            splat_mode: PickMode::Centers,
            use_physics: true,
        }
    }
}
