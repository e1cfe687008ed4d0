use asteroids_field::physic_engine::{Asteroid, AsteroidsPool};
use glam::Vec3;

fn rock(x: f32) -> Asteroid {
    Asteroid {
        position: Vec3::new(x, 0.0, 0.0),
        size: 1.0,
        ..Default::default()
    }
}

#[test]
fn test_pool_fills_in_slot_order_then_exhausts() {
    let mut pool = AsteroidsPool::new(4);

    let claimed: Vec<_> = (0..4).map(|i| pool.claim(rock(i as f32))).collect();
    assert_eq!(claimed, vec![Some(0), Some(1), Some(2), Some(3)]);
    assert!(pool.is_full());

    // Pool épuisé : échec "soft", rien ne change
    assert_eq!(pool.claim(rock(99.0)), None);
    assert_eq!(pool.alive_count(), 4);
    assert_eq!(pool.last_used(), 3);
}

#[test]
fn test_released_slot_is_reused() {
    let mut pool = AsteroidsPool::new(5);
    for i in 0..5 {
        pool.claim(rock(i as f32));
    }

    // On libère le slot 2 : c'est le seul libre, il doit être repris
    assert!(pool.release(2));
    assert_eq!(pool.alive_count(), 4);
    assert_eq!(pool.claim(rock(42.0)), Some(2));
    assert_eq!(pool.get(2).map(|a| a.position.x), Some(42.0));
    assert_eq!(pool.last_used(), 2);
}

#[test]
fn test_round_robin_starts_after_cursor() {
    let mut pool = AsteroidsPool::new(6);
    for i in 0..6 {
        pool.claim(rock(i as f32));
    }
    // curseur sur 5 ; on libère 1 et 4
    pool.release(1);
    pool.release(4);

    // le balayage part de (5 + 1) % 6 = 0 : premier libre = 1
    assert_eq!(pool.claim(rock(10.0)), Some(1));
    // puis à partir de 2 : premier libre = 4
    assert_eq!(pool.claim(rock(11.0)), Some(4));
    assert_eq!(pool.claim(rock(12.0)), None);
}

#[test]
fn test_cursor_skips_recently_freed_slot_behind_it() {
    let mut pool = AsteroidsPool::new(4);
    pool.claim(rock(0.0)); // 0
    pool.claim(rock(1.0)); // 1
    pool.release(0);

    // curseur = 1 : le slot 2 (libre, devant) passe avant le slot 0
    assert_eq!(pool.find_unused(), Some(2));
}

#[test]
fn test_release_out_of_bounds_and_dead_slot() {
    let mut pool = AsteroidsPool::new(2);
    assert!(!pool.release(7));
    assert!(!pool.release(0));
    pool.claim(rock(0.0));
    assert!(pool.release(0));
    assert!(!pool.release(0));
    assert_eq!(pool.alive_count(), 0);
}

#[test]
fn test_iter_alive_only_yields_live_slots() {
    let mut pool = AsteroidsPool::new(3);
    for i in 0..3 {
        pool.claim(rock(i as f32));
    }
    pool.release(1);

    let indices: Vec<usize> = pool.iter_alive().map(|(i, _)| i).collect();
    assert_eq!(indices, vec![0, 2]);
    assert_eq!(pool.slots().len(), 3);
}
