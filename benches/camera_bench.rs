use criterion::{criterion_group, criterion_main, Criterion, black_box};
use glam::{Mat4, Vec3};
use vista::camera::CameraPose;
use vista::options::{CameraOptions, PickingOptions};
use vista::picking::{HitTestCascade, PickContext, PickRequest, Ray};
use vista::scene::{Aabb, ElementId, ElementKind, SceneElement, SceneElements, SubPart};

struct GridScene {
    elements: Vec<SceneElement>,
}

impl GridScene {
    fn new(side: u32) -> Self {
        let part = SubPart {
            local_aabb: Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.4)),
        };
        let elements = (0..side * side)
            .map(|i| {
                let (x, y) = ((i % side) as f32, (i / side) as f32);
                SceneElement::mesh(
                    ElementId(i),
                    Mat4::from_translation(Vec3::new(x, y, 0.0)),
                    vec![part],
                )
            })
            .collect();
        Self { elements }
    }
}

impl SceneElements for GridScene {
    fn elements_by_kind(&self, kind: ElementKind) -> Vec<&SceneElement> {
        self.elements.iter().filter(|e| e.kind == kind).collect()
    }

    fn is_visible(&self, _id: ElementId) -> bool {
        true
    }

    fn set_visible(&mut self, _id: ElementId, _visible: bool) {}

    fn splat_center(&self, _id: ElementId, _index: u32) -> Option<Vec3> {
        None
    }
}

fn pose_advance_benchmark(c: &mut Criterion) {
    let mut pose = CameraPose::new(&CameraOptions::default());
    pose.set_azim_elev(200.0, 10.0, 1.0);
    pose.set_distance(3.0, 1.0);
    c.bench_function("pose_advance", |b| {
        b.iter(|| pose.advance(black_box(1.0 / 120.0)))
    });
}

fn screen_ray_benchmark(c: &mut Criterion) {
    let pose = CameraPose::new(&CameraOptions::default());
    c.bench_function("screen_ray", |b| {
        b.iter(|| black_box(pose.screen_ray(black_box(320.0), black_box(240.0), 640.0, 480.0)))
    });
}

fn slab_benchmark(c: &mut Criterion) {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
    let aabb = Aabb::from_center_half_extents(Vec3::new(0.2, -0.1, 0.0), Vec3::ONE);
    c.bench_function("ray_aabb_slab", |b| {
        b.iter(|| black_box(ray.intersect_aabb_slab(black_box(&aabb), 0.01)))
    });
}

fn cascade_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade_pick");
    let cascade = HitTestCascade::new(&PickingOptions::default());

    for side in [4, 16, 64].iter() {
        let mut scene = GridScene::new(*side);
        let mut pose = CameraPose::new(&CameraOptions::default());
        let extent = *side as f32;
        pose.on_scene_bound_changed(&Aabb::new(Vec3::splat(-0.5), Vec3::new(extent, extent, 0.5)));
        pose.set_focal_point(pose.scene_center(), 0.0);
        pose.set_azim_elev(0.0, 0.0, 0.0);
        pose.advance(0.0);

        group.bench_function(format!("{}_meshes", side * side), |b| {
            b.iter(|| {
                let mut ctx = PickContext::new(&mut scene);
                black_box(cascade.pick(PickRequest::new(320.0, 240.0, 640.0, 480.0), &pose, &mut ctx))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, pose_advance_benchmark, screen_ray_benchmark, slab_benchmark, cascade_benchmark);
criterion_main!(benches);
