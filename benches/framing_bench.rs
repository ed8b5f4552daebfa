//! Benchmarks for zoom-to-fit pose computation and model bounds.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use meshview::camera::framing::compute_pose;
use meshview::scene::model::{Mesh, Model, DEFAULT_BASE_COLOR};
use meshview::{Bounded, BoundingBox, ViewAxis};

/// A flat grid of `n × n` quads.
fn grid_model(n: u32) -> Model {
    let mut positions = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
    for y in 0..=n {
        for x in 0..=n {
            positions.push(Vec3::new(x as f32, y as f32, ((x * y) % 7) as f32 * 0.1));
        }
    }
    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    for y in 0..n {
        for x in 0..n {
            let i = y * (n + 1) + x;
            indices.extend_from_slice(&[i, i + 1, i + n + 1, i + 1, i + n + 2, i + n + 1]);
        }
    }
    let mesh = Mesh::from_parts("grid", &positions, None, indices, DEFAULT_BASE_COLOR);
    Model::from_meshes(vec![mesh]).expect("grid is not empty")
}

fn pose_benchmark(c: &mut Criterion) {
    let bounds = BoundingBox::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(2.0));
    let _ = c.bench_function("compute_pose", |b| {
        b.iter(|| {
            black_box(compute_pose(
                black_box(&bounds),
                black_box(75.0),
                ViewAxis::Z,
                true,
            ))
        })
    });
}

fn bounds_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_bounds");
    for n in [16_u32, 128, 512] {
        let model = grid_model(n);
        let _ = group.bench_function(format!("{n}x{n}"), |b| {
            b.iter(|| black_box(model.bounding_box()))
        });
    }
    group.finish();
}

criterion_group!(benches, pose_benchmark, bounds_benchmark);
criterion_main!(benches);
