use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How splats are drawn into the index buffer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PickMode {
    /// Soft footprint: a splat claims every pixel its faint center overlay
    /// covers above the alpha threshold.
    #[default]
    Centers,
    /// Hard-edged ring: a discrete footprint with no alpha falloff.
    Rings,
}

impl PickMode {
    /// Shader-side mode selector.
    #[must_use]
    pub fn shader_mode(self) -> u32 {
        match self {
            Self::Centers => 0,
            Self::Rings => 1,
        }
    }

    /// Alpha below which a fragment is discarded in the index pass.
    #[must_use]
    pub fn alpha_threshold(self) -> f32 {
        match self {
            Self::Centers => 1.0 / 255.0,
            Self::Rings => 0.5,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// Uniform block read by the splat index shader.
pub struct SplatPickUniform {
    /// [`PickMode::shader_mode`].
    pub mode: u32,
    /// [`PickMode::alpha_threshold`].
    pub alpha_threshold: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: [u32; 2],
}

impl From<PickMode> for SplatPickUniform {
    fn from(mode: PickMode) -> Self {
        Self {
            mode: mode.shader_mode(),
            alpha_threshold: mode.alpha_threshold(),
            _pad: [0; 2],
        }
    }
}
