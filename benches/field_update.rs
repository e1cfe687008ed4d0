use asteroids_field::physic_engine::{FieldConfig, PhysicEngine, PhysicEngineAsteroids, PhysicEngineIterator};
use asteroids_field::renderer_engine::{pack_instances, AsteroidGPU};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::hint::black_box;

/// Moteur pré-rempli (pool saturé) pour mesurer une frame en régime établi.
fn saturated_engine(max_asteroids: usize) -> PhysicEngineAsteroids {
    let config = FieldConfig {
        max_asteroids,
        new_asteroids_per_second: max_asteroids as f32,
        max_speed: 1.0,
        seed: Some(2024),
        ..Default::default()
    };
    let mut engine = match PhysicEngineAsteroids::new(&config) {
        Ok(engine) => engine,
        Err(e) => panic!("invalid bench config: {}", e),
    };
    engine.update(2.0, Vec3::ZERO);
    engine
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("asteroids frame");

    for &max in &[100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("update", max), &max, |b, &max| {
            let mut engine = saturated_engine(max);
            b.iter(|| black_box(engine.update(black_box(1.0 / 60.0), Vec3::ZERO)));
        });

        group.bench_with_input(BenchmarkId::new("sort + pack", max), &max, |b, &max| {
            let mut engine = saturated_engine(max);
            let mut staging: Vec<AsteroidGPU> = Vec::with_capacity(max);
            let mut angle = 0.0f32;
            b.iter(|| {
                angle += 0.01;
                let camera = Vec3::new(angle.cos() * 90.0, 20.0, angle.sin() * 90.0);
                engine.sort_by_depth(camera);
                pack_instances(&mut staging, engine.iter_depth_sorted());
                black_box(staging.len())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
