//! Ordered hit-test cascade.
//!
//! Stages run strictly in order and the first stage that reports anything
//! wins, whatever the distances involved:
//!
//! 1. physics raycast (when a physics world is attached)
//! 2. mesh sub-part bounds
//! 3. mesh aggregate bounds
//! 4. screen-space proximity of mesh bound centers
//! 5. GPU splat index readback
//!
//! Within a stage the closest candidate along the ray wins. Every
//! comparison is a strict `<` against the current best, so NaN distances
//! never win.

use glam::{Vec2, Vec3};

use super::ray::Ray;
use super::result::{PickRequest, PickResult, PickStage};
use crate::camera::CameraPose;
use crate::options::PickingOptions;
use crate::renderer::picking::{PickMode, SplatPicker};
use crate::scene::{ElementId, ElementKind, PhysicsWorld, SceneElements};

/// Collaborators a pick reads from.
///
/// Holding the scene mutably for the whole pick keeps scene-bound
/// notifications from being delivered mid-pick.
pub struct PickContext<'a> {
    /// Scene element enumeration and visibility.
    pub scene: &'a mut dyn SceneElements,
    /// Optional physics world.
    pub physics: Option<&'a dyn PhysicsWorld>,
    /// Optional splat picker; without one the splat stage is skipped.
    pub splats: Option<&'a mut SplatPicker>,
}

impl<'a> PickContext<'a> {
    /// Context with only a scene.
    pub fn new(scene: &'a mut dyn SceneElements) -> Self {
        Self {
            scene,
            physics: None,
            splats: None,
        }
    }

    /// Attach a physics world.
    #[must_use]
    pub fn with_physics(mut self, physics: &'a dyn PhysicsWorld) -> Self {
        self.physics = Some(physics);
        self
    }

    /// Attach a splat picker.
    #[must_use]
    pub fn with_splats(mut self, splats: &'a mut SplatPicker) -> Self {
        self.splats = Some(splats);
        self
    }
}

/// Closest-so-far tracker for one stage.
struct Closest<T> {
    best: Option<(f32, T)>,
}

impl<T> Closest<T> {
    fn new() -> Self {
        Self { best: None }
    }

    /// Offer a candidate at distance `t`. NaN never replaces anything.
    fn offer(&mut self, t: f32, item: T) {
        let better = match &self.best {
            None => t >= 0.0,
            Some((best, _)) => t < *best,
        };
        if better {
            self.best = Some((t, item));
        }
    }

    fn into_inner(self) -> Option<(f32, T)> {
        self.best
    }
}

/// Resolves a screen pixel to the nearest interactable element.
#[derive(Debug, Clone)]
pub struct HitTestCascade {
    screen_fallback_radius: f32,
    slab_tolerance: f32,
    splat_mode: PickMode,
    use_physics: bool,
}

impl HitTestCascade {
    /// Create a cascade configured from `options`.
    pub fn new(options: &PickingOptions) -> Self {
        Self {
            screen_fallback_radius: options.screen_fallback_radius.max(0.0),
            slab_tolerance: options.slab_tolerance.max(0.0),
            splat_mode: options.splat_mode,
            use_physics: options.use_physics,
        }
    }

    /// Apply changed options.
    pub fn apply_options(&mut self, options: &PickingOptions) {
        *self = Self::new(options);
    }

    /// Run the cascade.
    #[must_use]
    pub fn pick(&self, request: PickRequest, camera: &CameraPose, ctx: &mut PickContext<'_>) -> PickResult {
        self.pick_with_stage(request, camera, ctx).0
    }

    /// Run the cascade and report which stage produced the result.
    pub fn pick_with_stage(
        &self,
        request: PickRequest,
        camera: &CameraPose,
        ctx: &mut PickContext<'_>,
    ) -> (PickResult, Option<PickStage>) {
        let PickRequest { x, y, width, height } = request;
        let (near, far) = camera.screen_segment(x, y, width, height);
        let ray = Ray::between(near, far);

        let hit = self
            .physics_stage(&ray, near, far, ctx)
            .map(|r| (r, PickStage::Physics))
            .or_else(|| Self::sub_part_stage(&ray, &*ctx.scene).map(|r| (r, PickStage::SubPart)))
            .or_else(|| self.aggregate_stage(&ray, &*ctx.scene).map(|r| (r, PickStage::Aggregate)))
            .or_else(|| {
                self.screen_fallback_stage(&ray, request, camera, &*ctx.scene)
                    .map(|r| (r, PickStage::ScreenFallback))
            })
            .or_else(|| self.splat_stage(&ray, request, camera, ctx).map(|r| (r, PickStage::Splat)));

        match hit {
            Some((result, stage)) => {
                log::debug!("pick at ({x}, {y}) resolved by {stage:?}: {result:?}");
                (result, Some(stage))
            }
            None => (PickResult::None, None),
        }
    }

    // ── Stages ──────────────────────────────────────────────────────────

    fn physics_stage(
        &self,
        ray: &Ray,
        near: Vec3,
        far: Vec3,
        ctx: &PickContext<'_>,
    ) -> Option<PickResult> {
        if !self.use_physics {
            return None;
        }
        let physics = ctx.physics?;
        let hit = physics.raycast_first(near, far)?;
        if !physics.is_pickable(hit.entity) {
            return None;
        }
        let model = physics.owning_mesh(hit.entity)?;
        let distance = (hit.point - ray.origin).length();
        if distance.is_nan() {
            return None;
        }
        Some(PickResult::Mesh {
            model,
            point: hit.point,
            distance,
        })
    }

    fn sub_part_stage(ray: &Ray, scene: &dyn SceneElements) -> Option<PickResult> {
        let mut closest = Closest::new();
        for mesh in scene.elements_by_kind(ElementKind::Mesh) {
            for part in &mesh.sub_parts {
                let world = part.local_aabb.transformed(&mesh.transform);
                if let Some(t) = ray.intersect_aabb(&world) {
                    closest.offer(t, mesh.id);
                }
            }
        }
        closest.into_inner().map(|(t, model)| mesh_hit(ray, model, t))
    }

    fn aggregate_stage(&self, ray: &Ray, scene: &dyn SceneElements) -> Option<PickResult> {
        let mut closest = Closest::new();
        for mesh in scene.elements_by_kind(ElementKind::Mesh) {
            let bound = &mesh.world_bound;
            let tolerance = self.slab_tolerance * bound.radius().max(1.0);
            let t = match (ray.intersect_aabb(bound), ray.intersect_aabb_slab(bound, tolerance)) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            if let Some(t) = t {
                closest.offer(t, mesh.id);
            }
        }
        closest.into_inner().map(|(t, model)| mesh_hit(ray, model, t))
    }

    fn screen_fallback_stage(
        &self,
        ray: &Ray,
        request: PickRequest,
        camera: &CameraPose,
        scene: &dyn SceneElements,
    ) -> Option<PickResult> {
        let cursor = Vec2::new(request.x, request.y);
        let mut nearest: Option<(f32, f32, ElementId, Vec3)> = None;
        for mesh in scene.elements_by_kind(ElementKind::Mesh) {
            let center = mesh.world_bound.center();
            let Some((pixel, depth)) = camera.world_to_screen(center, request.width, request.height) else {
                continue;
            };
            let d = pixel.distance(cursor);
            if d.is_nan() || d > self.screen_fallback_radius {
                continue;
            }
            let better = match nearest {
                None => true,
                Some((best_d, best_depth, _, _)) => d < best_d || (d == best_d && depth < best_depth),
            };
            if better {
                nearest = Some((d, depth, mesh.id, center));
            }
        }
        nearest.map(|(_, _, model, point)| PickResult::Mesh {
            model,
            point,
            distance: (point - ray.origin).length(),
        })
    }

    fn splat_stage(
        &self,
        ray: &Ray,
        request: PickRequest,
        camera: &CameraPose,
        ctx: &mut PickContext<'_>,
    ) -> Option<PickResult> {
        let picker = ctx.splats.as_deref_mut()?;
        let ids: Vec<ElementId> = ctx
            .scene
            .elements_by_kind(ElementKind::Splat)
            .iter()
            .map(|e| e.id)
            .collect();
        if ids.is_empty() {
            return None;
        }

        picker.set_mode(self.splat_mode);
        picker.ensure_capacity(request.width.max(1.0) as u32, request.height.max(1.0) as u32);
        let normal = camera.look_direction();

        let mut closest = Closest::new();
        for splat in ids {
            let index = match picker
                .prepare(&mut *ctx.scene, splat)
                .and_then(|()| picker.pick(request.x, request.y))
            {
                Ok(Some(index)) => index,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("splat pick readback failed for {splat:?}: {e}");
                    continue;
                }
            };
            let Some(center) = ctx.scene.splat_center(splat, index) else {
                continue;
            };
            if let Some(t) = ray.intersect_plane(center, normal) {
                closest.offer(t, (splat, index));
            }
        }

        closest.into_inner().map(|(t, (splat, index))| PickResult::SplatCenter {
            splat,
            index,
            point: ray.at(t),
            distance: t,
        })
    }
}

fn mesh_hit(ray: &Ray, model: ElementId, t: f32) -> PickResult {
    PickResult::Mesh {
        model,
        point: ray.at(t),
        distance: t,
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use glam::Mat4;
    use rustc_hash::{FxHashMap, FxHashSet};

    use super::*;
    use crate::options::CameraOptions;
    use crate::renderer::picking::FakeBackend;
    use crate::scene::{Aabb, PhysicsEntity, PhysicsHit, SceneElement, SubPart};

    const W: f32 = 100.0;
    const H: f32 = 100.0;

    #[derive(Default)]
    struct TestScene {
        elements: Vec<SceneElement>,
        hidden: FxHashSet<ElementId>,
        centers: FxHashMap<(ElementId, u32), Vec3>,
    }

    impl TestScene {
        fn add_box(&mut self, id: u32, center: Vec3, half: f32) {
            let part = SubPart {
                local_aabb: Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(half)),
            };
            self.elements
                .push(SceneElement::mesh(ElementId(id), Mat4::from_translation(center), vec![part]));
        }

        fn add_splat(&mut self, id: u32, index: u32, center: Vec3) {
            self.elements.push(SceneElement::splat(
                ElementId(id),
                Mat4::IDENTITY,
                Aabb::from_center_half_extents(center, Vec3::ONE),
            ));
            let _ = self.centers.insert((ElementId(id), index), center);
        }
    }

    impl SceneElements for TestScene {
        fn elements_by_kind(&self, kind: ElementKind) -> Vec<&SceneElement> {
            self.elements
                .iter()
                .filter(|e| e.kind == kind && !self.hidden.contains(&e.id))
                .collect()
        }

        fn is_visible(&self, id: ElementId) -> bool {
            !self.hidden.contains(&id)
        }

        fn set_visible(&mut self, id: ElementId, visible: bool) {
            if visible {
                let _ = self.hidden.remove(&id);
            } else {
                let _ = self.hidden.insert(id);
            }
        }

        fn splat_center(&self, id: ElementId, index: u32) -> Option<Vec3> {
            self.centers.get(&(id, index)).copied()
        }
    }

    struct TestPhysics {
        hit: Option<PhysicsHit>,
        pickable: bool,
    }

    impl PhysicsWorld for TestPhysics {
        fn raycast_first(&self, _from: Vec3, _to: Vec3) -> Option<PhysicsHit> {
            self.hit
        }

        fn is_pickable(&self, _entity: PhysicsEntity) -> bool {
            self.pickable
        }

        fn owning_mesh(&self, entity: PhysicsEntity) -> Option<ElementId> {
            Some(ElementId(entity.0 as u32))
        }
    }

    /// Camera at +Z looking at the origin; the center pixel looks down -Z.
    fn camera() -> CameraPose {
        let mut pose = CameraPose::new(&CameraOptions::default());
        pose.on_scene_bound_changed(&Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(2.0)));
        pose.set_pose(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 0.0);
        pose.advance(0.0);
        pose
    }

    fn center() -> PickRequest {
        PickRequest::new(W / 2.0, H / 2.0, W, H)
    }

    fn splat_picker(splat: u32, index: u32) -> SplatPicker {
        let mut backend = FakeBackend::default();
        let _ = backend
            .coverage
            .insert(ElementId(splat), FxHashMap::from_iter([((50, 50), index)]));
        SplatPicker::new(Box::new(backend))
    }

    fn cascade() -> HitTestCascade {
        HitTestCascade::new(&PickingOptions::default())
    }

    #[test]
    fn closest_sub_part_wins() {
        let mut scene = TestScene::default();
        scene.add_box(1, Vec3::ZERO, 1.0);
        scene.add_box(2, Vec3::new(0.0, 0.0, 4.0), 1.0);
        let mut ctx = PickContext::new(&mut scene);
        let (result, stage) = cascade().pick_with_stage(center(), &camera(), &mut ctx);
        assert_eq!(stage, Some(PickStage::SubPart));
        match result {
            PickResult::Mesh { model, point, .. } => {
                assert_eq!(model, ElementId(2));
                assert!((point.z - 5.0).abs() < 1e-3);
            }
            other => unreachable!("expected mesh hit, got {other:?}"),
        }
    }

    #[test]
    fn mesh_beats_closer_splat() {
        let mut scene = TestScene::default();
        scene.add_box(1, Vec3::ZERO, 1.0);
        scene.add_splat(5, 3, Vec3::new(0.0, 0.0, 4.0));
        let mut picker = splat_picker(5, 3);
        let mut ctx = PickContext::new(&mut scene).with_splats(&mut picker);
        let result = cascade().pick(center(), &camera(), &mut ctx);
        assert!(matches!(result, PickResult::Mesh { model: ElementId(1), .. }));
    }

    #[test]
    fn splat_hit_lands_on_camera_facing_plane() {
        let mut scene = TestScene::default();
        scene.add_splat(5, 7, Vec3::new(0.0, 0.0, 1.0));
        let mut picker = splat_picker(5, 7);
        let mut ctx = PickContext::new(&mut scene).with_splats(&mut picker);
        let (result, stage) = cascade().pick_with_stage(center(), &camera(), &mut ctx);
        assert_eq!(stage, Some(PickStage::Splat));
        match result {
            PickResult::SplatCenter { splat, index, point, distance } => {
                assert_eq!((splat, index), (ElementId(5), 7));
                assert!((point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-3);
                assert!(distance > 0.0);
            }
            other => unreachable!("expected splat hit, got {other:?}"),
        }
    }

    #[test]
    fn closest_splat_across_elements_wins() {
        let mut scene = TestScene::default();
        scene.add_splat(5, 1, Vec3::new(0.0, 0.0, -2.0));
        scene.add_splat(6, 2, Vec3::new(0.0, 0.0, 2.0));
        let mut backend = FakeBackend::default();
        let _ = backend.coverage.insert(ElementId(5), FxHashMap::from_iter([((50, 50), 1)]));
        let _ = backend.coverage.insert(ElementId(6), FxHashMap::from_iter([((50, 50), 2)]));
        let mut picker = SplatPicker::new(Box::new(backend));
        let mut ctx = PickContext::new(&mut scene).with_splats(&mut picker);
        let result = cascade().pick(center(), &camera(), &mut ctx);
        assert!(matches!(result, PickResult::SplatCenter { splat: ElementId(6), index: 2, .. }));
    }

    #[test]
    fn miss_reports_none() {
        let mut scene = TestScene::default();
        scene.add_box(1, Vec3::new(50.0, 0.0, 0.0), 0.1);
        let options = PickingOptions {
            screen_fallback_radius: 10.0,
            ..PickingOptions::default()
        };
        let mut picker = splat_picker(5, 3);
        let mut ctx = PickContext::new(&mut scene).with_splats(&mut picker);
        let (result, stage) = HitTestCascade::new(&options).pick_with_stage(center(), &camera(), &mut ctx);
        assert!(result.is_none());
        assert_eq!(stage, None);
    }

    #[test]
    fn pickable_physics_hit_short_circuits() {
        let mut scene = TestScene::default();
        scene.add_box(1, Vec3::new(0.0, 0.0, 4.0), 1.0);
        let physics = TestPhysics {
            hit: Some(PhysicsHit {
                entity: PhysicsEntity(9),
                point: Vec3::ZERO,
            }),
            pickable: true,
        };
        let mut ctx = PickContext::new(&mut scene).with_physics(&physics);
        let (result, stage) = cascade().pick_with_stage(center(), &camera(), &mut ctx);
        assert_eq!(stage, Some(PickStage::Physics));
        assert!(matches!(result, PickResult::Mesh { model: ElementId(9), .. }));
    }

    #[test]
    fn unpickable_physics_hit_falls_through() {
        let mut scene = TestScene::default();
        scene.add_box(1, Vec3::ZERO, 1.0);
        let physics = TestPhysics {
            hit: Some(PhysicsHit {
                entity: PhysicsEntity(9),
                point: Vec3::ZERO,
            }),
            pickable: false,
        };
        let mut ctx = PickContext::new(&mut scene).with_physics(&physics);
        let (result, stage) = cascade().pick_with_stage(center(), &camera(), &mut ctx);
        assert_eq!(stage, Some(PickStage::SubPart));
        assert!(matches!(result, PickResult::Mesh { model: ElementId(1), .. }));
    }

    #[test]
    fn aggregate_bound_catches_sub_part_misses() {
        let mut scene = TestScene::default();
        scene.elements.push(SceneElement {
            id: ElementId(3),
            kind: ElementKind::Mesh,
            transform: Mat4::IDENTITY,
            world_bound: Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(4.0)),
            sub_parts: vec![SubPart {
                local_aabb: Aabb::from_center_half_extents(Vec3::new(3.0, 3.0, 0.0), Vec3::splat(0.5)),
            }],
        });
        let mut ctx = PickContext::new(&mut scene);
        let (result, stage) = cascade().pick_with_stage(center(), &camera(), &mut ctx);
        assert_eq!(stage, Some(PickStage::Aggregate));
        assert!(matches!(result, PickResult::Mesh { model: ElementId(3), .. }));
    }

    #[test]
    fn screen_fallback_catches_grazing_clicks() {
        let mut scene = TestScene::default();
        scene.add_box(4, Vec3::new(0.3, 0.0, 0.0), 0.01);
        let mut ctx = PickContext::new(&mut scene);
        let (result, stage) = cascade().pick_with_stage(center(), &camera(), &mut ctx);
        assert_eq!(stage, Some(PickStage::ScreenFallback));
        let point = result.point().unwrap();
        assert!((point - Vec3::new(0.3, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn readback_failure_is_a_miss_and_restores_visibility() {
        let mut scene = TestScene::default();
        scene.add_splat(5, 3, Vec3::ZERO);
        scene.add_splat(6, 3, Vec3::ZERO);
        let backend = FakeBackend {
            fail_read: true,
            ..FakeBackend::default()
        };
        let mut picker = SplatPicker::new(Box::new(backend));
        let mut ctx = PickContext::new(&mut scene).with_splats(&mut picker);
        let result = cascade().pick(center(), &camera(), &mut ctx);
        assert!(result.is_none());
        assert!(scene.is_visible(ElementId(5)));
        assert!(scene.is_visible(ElementId(6)));
    }

    #[test]
    fn splat_mode_option_reaches_the_backend() {
        let mut scene = TestScene::default();
        scene.add_splat(5, 3, Vec3::ZERO);
        let backend = FakeBackend::default();
        let last_mode = Rc::clone(&backend.last_mode);
        let mut picker = SplatPicker::new(Box::new(backend));
        let options = PickingOptions {
            splat_mode: PickMode::Rings,
            ..PickingOptions::default()
        };
        let mut ctx = PickContext::new(&mut scene).with_splats(&mut picker);
        let _ = HitTestCascade::new(&options).pick(center(), &camera(), &mut ctx);
        assert_eq!(last_mode.get(), Some(PickMode::Rings));
        assert_eq!(picker.mode(), PickMode::Rings);
    }

    #[test]
    fn nan_click_never_hits() {
        let mut scene = TestScene::default();
        scene.add_box(1, Vec3::ZERO, 1.0);
        scene.add_splat(5, 3, Vec3::ZERO);
        let mut picker = splat_picker(5, 3);
        let mut ctx = PickContext::new(&mut scene).with_splats(&mut picker);
        let request = PickRequest::new(f32::NAN, 50.0, W, H);
        assert!(cascade().pick(request, &camera(), &mut ctx).is_none());
    }
}
