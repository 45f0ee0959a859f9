use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tonemapping operator applied by the host renderer.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Tonemapping {
    /// No tonemapping.
    #[default]
    Linear,
    /// Filmic curve.
    Filmic,
    /// Hejl approximation.
    Hejl,
    /// ACES fitted curve.
    Aces,
    /// ACES 2.0 curve.
    Aces2,
    /// Khronos neutral.
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Projection and presentation toggles mirrored to the UI.
pub struct DisplayOptions {
    /// Start in orthographic projection.
    pub ortho: bool,
    /// Tonemapping operator.
    pub tonemapping: Tonemapping,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            ortho: false,
            tonemapping: Tonemapping::Linear,
        }
    }
}
