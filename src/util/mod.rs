//! Shared utilities for the viewport core.
//!
//! Helpers for damped interpolation and frame timing.

pub mod damped;
pub mod frame_timing;
