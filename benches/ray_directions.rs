use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use progressive_tracer::camera::Camera;
use progressive_tracer::config::CameraConfig;
use progressive_tracer::core::{Action, InputState};

/// Full ray cache rebuild, triggered through a resize
fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("ray_cache_resize");
    let config = CameraConfig::default();

    for &(width, height) in &[(320, 240), (800, 800), (1920, 1080)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &(width, height),
            |b, &(width, height)| {
                let mut camera = Camera::new(&config, width, height);
                let mut toggle = false;
                b.iter(|| {
                    toggle = !toggle;
                    let h = if toggle { height + 1 } else { height };
                    black_box(camera.resize(width, h));
                });
            },
        );
    }

    group.finish();
}

/// Per-frame cost while looking around, rays included
fn bench_look_frame(c: &mut Criterion) {
    let mut camera = Camera::new(&CameraConfig::default(), 800, 800);
    let input = InputState::default()
        .with_held(Action::Look)
        .with_pointer_delta(Vec2::new(3.0, 1.0));

    c.bench_function("look_frame_800x800", |b| {
        b.iter(|| black_box(camera.update(black_box(0.016), &input)));
    });
}

/// Same frame with the ray cache disabled
fn bench_look_frame_uncached(c: &mut Criterion) {
    let config = CameraConfig {
        ray_cache: false,
        ..CameraConfig::default()
    };
    let mut camera = Camera::new(&config, 800, 800);
    let input = InputState::default()
        .with_held(Action::Look)
        .with_pointer_delta(Vec2::new(3.0, 1.0));

    c.bench_function("look_frame_uncached", |b| {
        b.iter(|| black_box(camera.update(black_box(0.016), &input)));
    });
}

criterion_group!(benches, bench_resize, bench_look_frame, bench_look_frame_uncached);
criterion_main!(benches);
