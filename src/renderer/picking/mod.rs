//! GPU-based splat picking.
//!
//! Renders per-splat indices of one splat element into an offscreen
//! buffer and reads back the pixels under the cursor to resolve exactly
//! which splat was clicked.

mod decode;
mod mode;
mod picker;
mod target;

pub use decode::{decode_index, decode_rect, NO_SPLAT};
pub use mode::{PickMode, SplatPickUniform};
pub use picker::{SplatPickBackend, SplatPicker};
pub use target::{GpuSplatPickTarget, SplatIndexPass, DEPTH_FORMAT, INDEX_FORMAT};

#[cfg(test)]
pub(crate) use picker::tests::{FakeBackend, SplatScene};
