use glam::Vec3;

use crate::options::Tonemapping;
use crate::picking::PickResult;
use crate::scene::ElementId;

/// Notifications the viewport queues for its host.
///
/// Drained with [`Viewport::drain_events`](super::Viewport::drain_events).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// A pick finished. Fired for misses too, with every id `None` and
    /// the position at the origin.
    FocalPointPicked {
        /// Mesh model that was hit.
        model: Option<ElementId>,
        /// Splat element that was hit.
        splat: Option<ElementId>,
        /// Index of the hit splat within `splat`.
        splat_index: Option<u32>,
        /// World-space hit point.
        position: Vec3,
    },
    /// The viewport size changed.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// The projection switched; `true` is orthographic.
    Ortho(bool),
    /// The tonemapping operator changed.
    Tonemapping(Tonemapping),
}

impl ViewportEvent {
    pub(crate) fn from_pick(result: &PickResult) -> Self {
        match *result {
            PickResult::None => Self::FocalPointPicked {
                model: None,
                splat: None,
                splat_index: None,
                position: Vec3::ZERO,
            },
            PickResult::Mesh { model, point, .. } => Self::FocalPointPicked {
                model: Some(model),
                splat: None,
                splat_index: None,
                position: point,
            },
            PickResult::SplatCenter { splat, index, point, .. } => Self::FocalPointPicked {
                model: None,
                splat: Some(splat),
                splat_index: Some(index),
                position: point,
            },
        }
    }
}
