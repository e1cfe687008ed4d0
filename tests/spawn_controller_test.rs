use asteroids_field::physic_engine::spawn_controller::random_asteroid;
use asteroids_field::physic_engine::{
    AsteroidsPool, FieldConfig, PhysicEngine, PhysicEngineAsteroids, SpawnController,
};
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};

fn config(rate: f32, max_asteroids: usize) -> FieldConfig {
    FieldConfig {
        max_asteroids,
        new_asteroids_per_second: rate,
        seed: Some(7),
        ..Default::default()
    }
}

#[test]
fn test_spawn_rate_fidelity_with_small_ticks() {
    let mut engine = PhysicEngineAsteroids::new(&config(5.0, 100)).unwrap();

    let spawned: usize = (0..100)
        .map(|_| engine.update(0.01, Vec3::ZERO).spawned)
        .sum();

    assert_eq!(spawned, 5);
    assert_eq!(engine.alive_count(), 5);
}

#[test]
fn test_budget_never_drifts_over_many_ticks() {
    let mut spawner = SpawnController::new();
    let due: u64 = (0..60_000).map(|_| spawner.advance(1.0 / 60.0, 3.0)).sum();
    // 1000 s à 3/s
    assert!((2999..=3000).contains(&due), "due = {}", due);
}

#[test]
fn test_large_dt_is_capped_by_pool_capacity() {
    let mut engine = PhysicEngineAsteroids::new(&config(50.0, 8)).unwrap();

    // une frame "perdue" de 10 s : 500 spawns dus, 8 slots seulement
    let result = engine.update(10.0, Vec3::ZERO);
    assert_eq!(result.spawned, 8);
    assert_eq!(result.alive, 8);
}

#[test]
fn test_exhaustion_does_not_burst_later() {
    let cfg = FieldConfig {
        max_speed: 0.0,
        ..config(10.0, 2)
    };
    let mut pool = AsteroidsPool::new(2);
    let mut spawner = SpawnController::new();
    let mut rng = StdRng::seed_from_u64(1);

    // 1 s à 10/s : 10 dus, 2 créés, 8 abandonnés
    assert_eq!(spawner.spawn(1.0, Vec3::ZERO, &cfg, 1, &mut pool, &mut rng), 2);

    pool.release(0);
    pool.release(1);

    // 0.1 s plus tard : un seul spawn dû, pas de rattrapage des 8 abandonnés
    assert_eq!(spawner.spawn(0.1, Vec3::ZERO, &cfg, 1, &mut pool, &mut rng), 1);
    assert_eq!(spawner.total_spawned(), 3);
}

#[test]
fn test_zero_rate_never_spawns() {
    let mut engine = PhysicEngineAsteroids::new(&config(0.0, 10)).unwrap();
    for _ in 0..100 {
        engine.update(0.5, Vec3::ZERO);
    }
    assert_eq!(engine.alive_count(), 0);
}

#[test]
fn test_spawned_asteroids_stay_in_shell_around_moving_center() {
    let cfg = FieldConfig {
        max_speed: 3.0,
        ..config(5.0, 10)
    };
    let mut rng = StdRng::seed_from_u64(99);
    let center = Vec3::new(100.0, -20.0, 5.0);

    for _ in 0..500 {
        let a = random_asteroid(&cfg, center, 3, &mut rng);
        let d = a.position.distance(center);
        assert!(d >= cfg.min_radius - 1e-3 && d <= cfg.max_radius + 1e-3);
        assert!(a.velocity.length() <= cfg.max_speed + 1e-4);
        assert!(a.texture_layer < 3);
        assert!((cfg.min_size..=cfg.max_size).contains(&a.size));
        assert!(a.alive);
    }
}

#[test]
fn test_same_seed_same_field() {
    let cfg = config(20.0, 50);
    let mut a = PhysicEngineAsteroids::new(&cfg).unwrap();
    let mut b = PhysicEngineAsteroids::new(&cfg).unwrap();
    for _ in 0..30 {
        a.update(0.1, Vec3::ZERO);
        b.update(0.1, Vec3::ZERO);
    }
    let pa: Vec<Vec3> = a.pool().iter_alive().map(|(_, x)| x.position).collect();
    let pb: Vec<Vec3> = b.pool().iter_alive().map(|(_, x)| x.position).collect();
    assert_eq!(pa, pb);
}
