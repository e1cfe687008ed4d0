use glam::Vec3;
use log::debug;
use rand::Rng;

use crate::physic_engine::{asteroid::Asteroid, asteroids_pool::AsteroidsPool, FieldConfig};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Tolérance sur le budget de spawn : absorbe les erreurs d'arrondi des `dt`
/// en `f32` (ex: 0.1f32 n'est pas exactement 0.1).
const SPAWN_EPSILON: f64 = 1e-6;

/// Décide quand et où créer de nouveaux astéroïdes.
///
/// Le nombre de spawns est calculé à partir d'un budget de temps cumulé
/// (`elapsed_ns`) et non arrondi à chaque tick : 100 ticks de 10 ms à
/// 5 astéroïdes/s produisent exactement 5 spawns, pas 0.
#[derive(Debug, Default, Clone)]
pub struct SpawnController {
    /// Temps total écoulé, en nanosecondes entières (pas de dérive)
    elapsed_ns: u64,
    /// Spawns déjà décomptés du budget (réussis ou abandonnés)
    budgeted: u64,
    /// Spawns effectivement réalisés
    spawned: u64,
}

impl SpawnController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oublie le budget accumulé (ex: changement de cadence au rechargement).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn total_spawned(&self) -> u64 {
        self.spawned
    }

    /// Avance le budget de `dt` secondes et retourne le nombre de spawns dus.
    ///
    /// Un `dt` négatif ou non fini est ignoré. Le temps cumulé sature à
    /// `u64::MAX` nanosecondes au lieu de déborder.
    pub fn advance(&mut self, dt: f32, rate: f32) -> u64 {
        if dt.is_finite() && dt > 0.0 {
            // `as u64` sature déjà pour les dt gigantesques
            let dt_ns = (dt as f64 * NANOS_PER_SECOND).round() as u64;
            self.elapsed_ns = self.elapsed_ns.saturating_add(dt_ns);
        }
        let target =
            (self.elapsed_ns as f64 * rate as f64 / NANOS_PER_SECOND + SPAWN_EPSILON).floor();
        let target = target.max(0.0) as u64;
        let due = target.saturating_sub(self.budgeted);
        self.budgeted = self.budgeted.saturating_add(due);
        due
    }

    /// Avance le budget puis réserve un slot du pool par spawn dû.
    ///
    /// Si le pool est épuisé, les spawns restants de ce tick sont abandonnés
    /// (pas d'erreur, pas de rattrapage en rafale au tick suivant).
    /// Retourne le nombre d'astéroïdes effectivement créés.
    pub fn spawn<R: Rng>(
        &mut self,
        dt: f32,
        center: Vec3,
        config: &FieldConfig,
        texture_layers: u32,
        pool: &mut AsteroidsPool,
        rng: &mut R,
    ) -> usize {
        let due = self.advance(dt, config.new_asteroids_per_second);
        let mut count = 0;

        for _ in 0..due {
            let asteroid = random_asteroid(config, center, texture_layers, rng);
            match pool.claim(asteroid) {
                Some(index) => {
                    debug!(
                        "☄️ Asteroid spawned in slot {} at ({:.2}, {:.2}, {:.2})",
                        index, asteroid.position.x, asteroid.position.y, asteroid.position.z
                    );
                    count += 1;
                }
                None => {
                    debug!(
                        "Asteroids pool exhausted ({} slots): {} spawn(s) skipped",
                        pool.capacity(),
                        due as usize - count
                    );
                    break;
                }
            }
        }

        self.spawned += count as u64;
        count
    }
}

/// Direction uniforme sur la sphère unité.
pub fn random_unit_vector<R: Rng>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let phi: f32 = rng.random_range(0.0..std::f32::consts::TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Point uniformément réparti (en volume) dans la coquille `[min_radius, max_radius]`.
pub fn random_point_in_shell<R: Rng>(
    rng: &mut R,
    center: Vec3,
    min_radius: f32,
    max_radius: f32,
) -> Vec3 {
    let (min3, max3) = (min_radius.powi(3), max_radius.powi(3));
    let u: f32 = rng.random_range(0.0..=1.0);
    let distance = (min3 + u * (max3 - min3))
        .cbrt()
        .clamp(min_radius, max_radius);
    center + random_unit_vector(rng) * distance
}

/// Tire un astéroïde aléatoire selon la configuration.
pub fn random_asteroid<R: Rng>(
    config: &FieldConfig,
    center: Vec3,
    texture_layers: u32,
    rng: &mut R,
) -> Asteroid {
    let speed = rng.random_range(0.0..=config.max_speed);
    Asteroid {
        position: random_point_in_shell(rng, center, config.min_radius, config.max_radius),
        velocity: random_unit_vector(rng) * speed,
        size: rng.random_range(config.min_size..=config.max_size),
        radius: rng.random_range(config.min_asteroid_radius..=config.max_asteroid_radius),
        camera_distance: -1.0,
        age: 0.0,
        texture_layer: rng.random_range(0..texture_layers.max(1)),
        brightness: rng.random_range(0.6..=1.0),
        alive: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_budget_accumulates_small_ticks() {
        let mut controller = SpawnController::new();
        let total: u64 = (0..100).map(|_| controller.advance(0.01, 5.0)).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_large_tick_spawns_everything_due() {
        let mut controller = SpawnController::new();
        assert_eq!(controller.advance(2.0, 5.0), 10);
        assert_eq!(controller.advance(0.0, 5.0), 0);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut controller = SpawnController::new();
        assert_eq!(controller.advance(-1.0, 5.0), 0);
        assert_eq!(controller.advance(f32::NAN, 5.0), 0);
        assert_eq!(controller.advance(f32::INFINITY, 5.0), 0);
    }

    #[test]
    fn test_huge_dt_saturates_instead_of_overflowing() {
        let mut controller = SpawnController::new();
        let due = controller.advance(1.0e12, 5.0);
        assert!(due > 0);

        // le temps cumulé est saturé : plus rien n'est dû, et pas de panique
        assert_eq!(controller.advance(1.0, 5.0), 0);
        assert_eq!(controller.advance(f32::MAX, 5.0), 0);
    }

    #[test]
    fn test_points_stay_in_shell() {
        let mut rng = StdRng::seed_from_u64(7);
        let center = Vec3::new(3.0, -2.0, 1.0);
        for _ in 0..1000 {
            let p = random_point_in_shell(&mut rng, center, 10.0, 50.0);
            let d = p.distance(center);
            assert!((10.0 - 1e-3..=50.0 + 1e-3).contains(&d), "distance {}", d);
        }
    }

    #[test]
    fn test_random_asteroid_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = FieldConfig::default();
        for _ in 0..500 {
            let a = random_asteroid(&config, Vec3::ZERO, 3, &mut rng);
            assert!(a.alive);
            assert!(a.velocity.length() <= config.max_speed + 1e-5);
            assert!((config.min_size..=config.max_size).contains(&a.size));
            assert!(a.texture_layer < 3);
        }
    }
}
