use glam::Vec3;

use crate::physic_engine::asteroids_pool::AsteroidsPool;

/// Politique de retrait des astéroïdes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetirementPolicy {
    /// Distance au centre au-delà de laquelle un astéroïde est retiré
    pub max_distance: f32,
    /// Durée de vie maximale (secondes), optionnelle
    pub lifetime: Option<f32>,
}

/// Intégrateur d'Euler explicite : pas de sous-pas, pas de collisions.
///
/// Retourne le nombre d'astéroïdes retirés pendant ce pas. Les slots retirés
/// sont immédiatement réutilisables par le pool.
pub fn integrate(
    pool: &mut AsteroidsPool,
    dt: f32,
    center: Vec3,
    policy: &RetirementPolicy,
) -> usize {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let max_distance_sq = policy.max_distance * policy.max_distance;

    let mut to_retire = Vec::new();
    for (index, asteroid) in pool.iter_alive_mut() {
        asteroid.position += asteroid.velocity * dt;
        asteroid.age += dt;

        let drifted = asteroid.position.distance_squared(center) > max_distance_sq;
        let expired = policy.lifetime.is_some_and(|life| asteroid.age >= life);
        if drifted || expired {
            to_retire.push(index);
        }
    }

    // on libère en différé car on itérait (mutablement) sur le pool
    for &index in &to_retire {
        pool.release(index);
    }
    to_retire.len()
}
