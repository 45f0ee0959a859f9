//! Narrow interfaces to the host scene.
//!
//! The viewport core never owns scene content. It enumerates visible
//! elements, toggles splat visibility for pick passes, and optionally
//! raycasts against a physics world through the traits defined here.

pub mod bounds;
mod element;
mod physics;

pub use bounds::Aabb;
pub use element::{ElementId, ElementKind, SceneElement, SceneElements, SubPart};
pub use physics::{PhysicsEntity, PhysicsHit, PhysicsWorld};
