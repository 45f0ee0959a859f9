//! Centralized viewport options with TOML preset support.
//!
//! Camera limits and sensitivities, input thresholds, picking parameters,
//! display toggles and keybindings are consolidated here. Options
//! serialize to/from TOML so hosts can ship and restore view presets.

mod camera;
mod display;
mod input;
mod keybindings;
mod picking;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::{DisplayOptions, Tonemapping};
pub use input::InputOptions;
pub use keybindings::KeybindingOptions;
pub use picking::PickingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VistaError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection, limits and control parameters.
    pub camera: CameraOptions,
    /// Pointer and wheel translation thresholds.
    pub input: InputOptions,
    /// Hit-test cascade parameters.
    pub picking: PickingOptions,
    /// Projection and presentation toggles.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, VistaError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| VistaError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VistaError> {
        let content = std::fs::read_to_string(path).map_err(VistaError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VistaError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VistaError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VistaError::Io)?;
        }
        std::fs::write(path, content).map_err(VistaError::Io)
    }
}
