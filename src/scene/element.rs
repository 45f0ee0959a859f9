use glam::{Mat4, Vec3};

use super::bounds::Aabb;

/// Stable identifier of a scene element, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Representation of a scene element as far as picking is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Triangle mesh model with per-part bounds.
    Mesh,
    /// Gaussian splat cloud; per-splat geometry only exists on the GPU.
    Splat,
}

/// A renderable sub-part of a mesh model (one draw call / primitive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubPart {
    /// Bounds in the model's local space.
    pub local_aabb: Aabb,
}

/// The parts of a scene element the pick cascade reads.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    /// Element identifier.
    pub id: ElementId,
    /// Mesh or splat.
    pub kind: ElementKind,
    /// Local-to-world transform of the owning entity.
    pub transform: Mat4,
    /// World-space bounds of the whole element.
    pub world_bound: Aabb,
    /// Renderable sub-parts with local bounds. Empty for splats.
    pub sub_parts: Vec<SubPart>,
}

impl SceneElement {
    /// A mesh element whose world bound is derived from its sub-parts.
    pub fn mesh(id: ElementId, transform: Mat4, sub_parts: Vec<SubPart>) -> Self {
        let world_bound = sub_parts
            .iter()
            .map(|p| p.local_aabb.transformed(&transform))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| {
                let origin = transform.transform_point3(Vec3::ZERO);
                Aabb::new(origin, origin)
            });
        Self {
            id,
            kind: ElementKind::Mesh,
            transform,
            world_bound,
            sub_parts,
        }
    }

    /// A splat element with a precomputed world bound.
    pub fn splat(id: ElementId, transform: Mat4, world_bound: Aabb) -> Self {
        Self {
            id,
            kind: ElementKind::Splat,
            transform,
            world_bound,
            sub_parts: Vec::new(),
        }
    }
}

/// Scene element enumeration and visibility, provided by the host.
pub trait SceneElements {
    /// Currently visible elements of `kind`.
    fn elements_by_kind(&self, kind: ElementKind) -> Vec<&SceneElement>;

    /// Whether element `id` is currently visible.
    fn is_visible(&self, id: ElementId) -> bool;

    /// Show or hide element `id`. Unknown ids are ignored.
    fn set_visible(&mut self, id: ElementId, visible: bool);

    /// World-space center of splat `index` in splat element `id`.
    fn splat_center(&self, id: ElementId, index: u32) -> Option<Vec3>;
}
