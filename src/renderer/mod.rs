//! Rendering-side subsystems owned by the viewport core.
//!
//! Shading and compositing belong to the host renderer; this module only
//! carries the offscreen splat index target used by picking.

pub mod picking;
