use glam::Vec3;

use crate::scene::ElementId;

/// A pick at a viewport pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRequest {
    /// Pixel x.
    pub x: f32,
    /// Pixel y.
    pub y: f32,
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
}

impl PickRequest {
    /// Pick at (`x`, `y`) in a `width` × `height` viewport.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Outcome of a pick. At most one element is ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PickResult {
    /// Nothing under the cursor.
    #[default]
    None,
    /// A mesh model.
    Mesh {
        /// Model that was hit.
        model: ElementId,
        /// World-space hit point.
        point: Vec3,
        /// Distance along the pick ray.
        distance: f32,
    },
    /// A single splat of a splat element.
    SplatCenter {
        /// Splat element that was hit.
        splat: ElementId,
        /// Index of the splat within the element.
        index: u32,
        /// World-space point on the camera-facing plane through the splat.
        point: Vec3,
        /// Distance along the pick ray.
        distance: f32,
    },
}

impl PickResult {
    /// Hit point, if anything was hit.
    #[must_use]
    pub fn point(&self) -> Option<Vec3> {
        match *self {
            Self::None => None,
            Self::Mesh { point, .. } | Self::SplatCenter { point, .. } => Some(point),
        }
    }

    /// Distance along the pick ray, if anything was hit.
    #[must_use]
    pub fn distance(&self) -> Option<f32> {
        match *self {
            Self::None => None,
            Self::Mesh { distance, .. } | Self::SplatCenter { distance, .. } => Some(distance),
        }
    }

    /// Returns `true` if nothing was hit.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Cascade stage that produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickStage {
    /// Physics raycast against pickable proxies.
    Physics,
    /// Per-sub-part mesh bounds.
    SubPart,
    /// Whole-model mesh bounds.
    Aggregate,
    /// Projected bound centers near the cursor.
    ScreenFallback,
    /// GPU splat index buffer.
    Splat,
}
