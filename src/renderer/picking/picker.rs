//! Per-splat index picking.
//!
//! The picker isolates one splat element, renders its per-splat indices
//! into an off-screen target through a [`SplatPickBackend`], and decodes
//! the pixels under a point or rectangle. The index buffer is regenerated
//! for every pick.

use super::decode::{decode_rect, BYTES_PER_PIXEL};
use super::mode::PickMode;
use crate::error::ReadbackError;
use crate::scene::{ElementId, ElementKind, SceneElements};

/// GPU seam: owns the off-screen index target.
///
/// [`GpuSplatPickTarget`](super::GpuSplatPickTarget) is the wgpu
/// implementation; tests substitute an in-memory one.
pub trait SplatPickBackend {
    /// Resize the target to match the viewport. Must be cheap when the
    /// size is unchanged.
    fn ensure_capacity(&mut self, width: u32, height: u32);

    /// Current target size, `(0, 0)` before the first `ensure_capacity`.
    fn size(&self) -> (u32, u32);

    /// Clear the target and draw the indices of `splat`.
    fn render_index_pass(&mut self, splat: ElementId, mode: PickMode) -> Result<(), ReadbackError>;

    /// Read a rectangle inside the target as tightly packed RGBA8 rows.
    /// Callers clip the rectangle to [`size`](Self::size) first.
    fn read_rect(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<Vec<u8>, ReadbackError>;
}

/// Hides every visible splat but one and restores them on drop, so a
/// failed or panicking render pass cannot leave splats hidden.
struct VisibilityGuard<'a> {
    scene: &'a mut dyn SceneElements,
    hidden: Vec<ElementId>,
}

impl<'a> VisibilityGuard<'a> {
    fn isolate(scene: &'a mut dyn SceneElements, keep: ElementId) -> Self {
        let hidden: Vec<ElementId> = scene
            .elements_by_kind(ElementKind::Splat)
            .iter()
            .map(|e| e.id)
            .filter(|&id| id != keep)
            .collect();
        for &id in &hidden {
            scene.set_visible(id, false);
        }
        Self { scene, hidden }
    }
}

impl Drop for VisibilityGuard<'_> {
    fn drop(&mut self) {
        for &id in &self.hidden {
            self.scene.set_visible(id, true);
        }
    }
}

/// A rectangle clipped to the target: origin and size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Clipped {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// Renders and reads back per-splat indices.
pub struct SplatPicker {
    backend: Box<dyn SplatPickBackend>,
    mode: PickMode,
    prepared: Option<ElementId>,
}

impl SplatPicker {
    /// Wrap a backend. The pick mode defaults to [`PickMode::Centers`].
    pub fn new(backend: Box<dyn SplatPickBackend>) -> Self {
        Self {
            backend,
            mode: PickMode::default(),
            prepared: None,
        }
    }

    /// Current index-pass mode.
    #[must_use]
    pub fn mode(&self) -> PickMode {
        self.mode
    }

    /// Change the index-pass mode for subsequent prepares.
    pub fn set_mode(&mut self, mode: PickMode) {
        self.mode = mode;
    }

    /// Splat whose indices the target currently holds.
    #[must_use]
    pub fn prepared(&self) -> Option<ElementId> {
        self.prepared
    }

    /// Resize the pick target to the viewport.
    pub fn ensure_capacity(&mut self, width: u32, height: u32) {
        self.backend.ensure_capacity(width.max(1), height.max(1));
    }

    /// Render the indices of `splat` with every other splat hidden.
    /// Visibility is restored before returning, on success or error.
    pub fn prepare(&mut self, scene: &mut dyn SceneElements, splat: ElementId) -> Result<(), ReadbackError> {
        self.prepared = None;
        let guard = VisibilityGuard::isolate(scene, splat);
        let rendered = self.backend.render_index_pass(splat, self.mode);
        drop(guard);
        rendered?;
        self.prepared = Some(splat);
        Ok(())
    }

    /// Splat index under pixel (`x`, `y`). Coordinates outside the target
    /// (including NaN) are a miss.
    pub fn pick(&mut self, x: f32, y: f32) -> Result<Option<u32>, ReadbackError> {
        if x.is_nan() || y.is_nan() || x < 0.0 || y < 0.0 {
            return Ok(None);
        }
        let (px, py) = (x.floor() as u32, y.floor() as u32);
        Ok(self.pick_rect(px, py, 1, 1)?.into_iter().next().flatten())
    }

    /// Splat indices of a `width` × `height` block, row-major. Always
    /// returns `width * height` entries; pixels outside the target are
    /// `None`.
    pub fn pick_rect(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<Vec<Option<u32>>, ReadbackError> {
        let (w, h) = (width as usize, height as usize);
        let mut out = vec![None; w * h];
        let Some(rect) = self.clip(x, y, width, height) else {
            return Ok(out);
        };
        let bytes = self.backend.read_rect(rect.x, rect.y, rect.width, rect.height)?;
        let cw = rect.width as usize;
        let clipped = decode_rect(&bytes, cw, rect.height as usize, cw * BYTES_PER_PIXEL);
        for (row, chunk) in clipped.chunks(cw).enumerate() {
            out[row * w..row * w + cw].copy_from_slice(chunk);
        }
        Ok(out)
    }

    fn clip(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Clipped> {
        let (tw, th) = self.backend.size();
        if x >= tw || y >= th || width == 0 || height == 0 {
            return None;
        }
        Some(Clipped {
            x,
            y,
            width: width.min(tw - x),
            height: height.min(th - y),
        })
    }
}
