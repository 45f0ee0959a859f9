//! Screen-space picking.
//!
//! Resolves a viewport pixel to the nearest interactable element across
//! physics proxies, mesh bounds and GPU-rendered splat indices, with a
//! fixed stage precedence.

mod cascade;
mod ray;
mod result;

pub use cascade::{HitTestCascade, PickContext};
pub use ray::Ray;
pub use result::{PickRequest, PickResult, PickStage};
