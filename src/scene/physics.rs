use glam::Vec3;

use super::element::ElementId;

/// Handle of a body in the host's physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicsEntity(pub u64);

/// First body hit along a physics raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsHit {
    /// Body that was hit.
    pub entity: PhysicsEntity,
    /// World-space contact point.
    pub point: Vec3,
}

/// Optional physics collaborator used by the first pick stage.
pub trait PhysicsWorld {
    /// Cast a segment from `from` to `to` and return the first hit.
    fn raycast_first(&self, from: Vec3, to: Vec3) -> Option<PhysicsHit>;

    /// Whether `entity` carries the "pickable" tag.
    fn is_pickable(&self, entity: PhysicsEntity) -> bool;

    /// Mesh model that owns the physics proxy `entity`.
    fn owning_mesh(&self, entity: PhysicsEntity) -> Option<ElementId>;
}
