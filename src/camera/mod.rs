//! Camera system for 3D scene viewing.
//!
//! Provides a damped orbital camera pose with pan, zoom and fly, clipping
//! plane fitting, screen/world conversion, and the GPU uniform mirror.

/// Near/far plane fitting.
pub mod clipping;
/// GPU uniform buffer and bind group.
pub mod controller;
/// GPU uniform types.
pub mod core;
/// Damped orbit pose and projection.
pub mod pose;

pub use clipping::{fit_clipping_planes, ClipPlanes};
pub use controller::CameraController;
pub use pose::{AzimElev, CameraPose, ViewAxis};
