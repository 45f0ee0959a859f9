//! Crate-level error types.
//!
//! Camera and pick-cascade operations never fail; degenerate input is
//! floored or resolves to a miss. Errors only surface at the GPU readback
//! seam and when loading option presets.

use std::fmt;

/// Failure while reading pick-buffer pixels back from the GPU.
#[derive(Debug)]
pub enum ReadbackError {
    /// Mapping the staging buffer failed.
    Map(wgpu::BufferAsyncError),
    /// Waiting on the device failed (device lost or timeout).
    Poll(String),
    /// The map callback was dropped without reporting a result.
    Disconnected,
    /// The pick target has not been sized yet.
    NotAllocated,
}

impl fmt::Display for ReadbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(e) => write!(f, "staging buffer map failed: {e}"),
            Self::Poll(msg) => write!(f, "device poll failed: {msg}"),
            Self::Disconnected => {
                write!(f, "map callback dropped before completion")
            }
            Self::NotAllocated => {
                write!(f, "pick target used before ensure_capacity")
            }
        }
    }
}

impl std::error::Error for ReadbackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Map(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors produced by the vista crate.
#[derive(Debug)]
pub enum VistaError {
    /// Pick-buffer readback failure.
    Readback(ReadbackError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for VistaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Readback(e) => write!(f, "pick readback error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for VistaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Readback(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<ReadbackError> for VistaError {
    fn from(e: ReadbackError) -> Self {
        Self::Readback(e)
    }
}

impl From<std::io::Error> for VistaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
