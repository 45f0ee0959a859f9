use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, limits, damping and control sensitivities.
pub struct CameraOptions {
    /// Field of view in degrees (applied to the narrower viewport axis).
    #[schemars(title = "Field of View", range(min = 10.0, max = 120.0), extend("step" = 1.0))]
    pub fov: f32,
    /// Lowest allowed elevation in degrees.
    #[schemars(skip)]
    pub min_elev: f32,
    /// Highest allowed elevation in degrees.
    #[schemars(skip)]
    pub max_elev: f32,
    /// Closest normalized zoom distance (in scene radii).
    #[schemars(skip)]
    pub min_zoom: f32,
    /// Farthest normalized zoom distance (in scene radii).
    #[schemars(skip)]
    pub max_zoom: f32,
    /// Base damping half-life in seconds for user-driven motion.
    #[schemars(title = "Damping", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub damping: f32,
    /// Degrees of orbit per pixel of drag.
    #[schemars(title = "Orbit Speed", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub orbit_sensitivity: f32,
    /// Pan multiplier applied to the world-units-per-pixel estimate.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub pan_sensitivity: f32,
    /// Fractional distance change per zoom unit.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub zoom_sensitivity: f32,
    /// Fly speed in scene radii per second.
    #[schemars(title = "Fly Speed", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub fly_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov: 50.0,
            min_elev: -90.0,
            max_elev: 90.0,
            min_zoom: 0.001,
            max_zoom: 100.0,
            damping: 0.08,
            orbit_sensitivity: 0.3,
            pan_sensitivity: 1.0,
            zoom_sensitivity: 0.4,
            fly_speed: 1.0,
        }
    }
}
