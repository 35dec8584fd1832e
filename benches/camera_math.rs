use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Mat3, Mat4, Vec3};
use room_viewer::{Camera, CameraMovement, SceneConfig};

/// Benchmark: view matrix from a settled camera
fn bench_view_matrix(c: &mut Criterion) {
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
    camera.process_mouse_movement(250.0, -40.0, true);

    c.bench_function("view_matrix", |b| {
        b.iter(|| black_box(camera.view_matrix()))
    });
}

/// Benchmark: perspective matrix from the current zoom
fn bench_projection_matrix(c: &mut Criterion) {
    let camera = Camera::new(Vec3::ZERO);
    let aspect = 1280.0 / 720.0;

    c.bench_function("projection_matrix", |b| {
        b.iter(|| {
            black_box(Mat4::perspective_rh(
                black_box(camera.zoom().to_radians()),
                black_box(aspect),
                0.1,
                100.0,
            ))
        })
    });
}

/// Benchmark: mouse-look updates, which recompute the basis vectors
fn bench_mouse_look(c: &mut Criterion) {
    c.bench_function("mouse_look_update", |b| {
        let mut camera = Camera::new(Vec3::ZERO);
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            let dx = ((i % 37) as f32) - 18.0;
            let dy = ((i % 23) as f32) - 11.0;
            camera.process_mouse_movement(black_box(dx), black_box(dy), true);
            black_box(camera.front())
        })
    });
}

/// Benchmark: one full frame of input applied to the camera
fn bench_input_frame(c: &mut Criterion) {
    c.bench_function("full_input_frame", |b| {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
        let delta = 1.0 / 144.0;
        b.iter(|| {
            camera.process_keyboard(CameraMovement::Forward, black_box(delta));
            camera.process_keyboard(CameraMovement::Right, black_box(delta));
            camera.process_mouse_movement(black_box(3.0), black_box(-1.5), true);
            camera.process_mouse_scroll(black_box(0.1));
            black_box(camera.view_matrix())
        })
    });
}

/// Benchmark: rebuilding model matrices for growing object counts
fn bench_model_matrices(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_matrices");

    let bedroom = SceneConfig::bedroom();
    for count in [12, 120, 1200].iter() {
        let objects: Vec<_> = bedroom
            .objects
            .iter()
            .cycle()
            .take(*count)
            .cloned()
            .collect();

        group.bench_with_input(BenchmarkId::new("objects", count), count, |b, _| {
            b.iter(|| {
                let mut sum = Mat4::ZERO;
                for object in &objects {
                    sum += object.model_matrix();
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}

/// Benchmark: stripping the view translation for the skybox pass
fn bench_strip_translation(c: &mut Criterion) {
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 3.0));
    camera.process_mouse_movement(90.0, 12.0, true);
    let view = camera.view_matrix();

    c.bench_function("strip_view_translation", |b| {
        b.iter(|| black_box(Mat4::from_mat3(Mat3::from_mat4(black_box(view)))))
    });
}

criterion_group!(
    benches,
    bench_view_matrix,
    bench_projection_matrix,
    bench_mouse_look,
    bench_input_frame,
    bench_model_matrices,
    bench_strip_translation,
);

criterion_main!(benches);
