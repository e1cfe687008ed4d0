use glam::Vec3;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::physic_engine::{
    asteroid::Asteroid,
    asteroids_pool::AsteroidsPool,
    config::{FieldConfig, FieldConfigError},
    depth_sorter::DepthSorter,
    motion_integrator::{integrate, RetirementPolicy},
    spawn_controller::SpawnController,
    types::UpdateResult,
    PhysicEngine, PhysicEngineFull, PhysicEngineIterator,
};

/// Moteur de simulation du champ d'astéroïdes.
///
/// Enchaîne, pour chaque `update` : `SpawnController` → intégrateur de
/// mouvement. Le tri en profondeur est fait à la demande (`sort_by_depth`),
/// juste avant l'upload GPU.
#[derive(Debug)]
pub struct PhysicEngineAsteroids {
    pool: AsteroidsPool,
    spawner: SpawnController,
    sorter: DepthSorter,
    rng: StdRng,

    config: FieldConfig,
    texture_layers: u32,
}

impl PhysicEngineAsteroids {
    /// Crée le moteur. Une configuration incohérente est refusée ici.
    pub fn new(config: &FieldConfig) -> Result<Self, FieldConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            "☄️ Asteroids field: {} slots, shell [{}, {}], {} new/s",
            config.max_asteroids,
            config.min_radius,
            config.max_radius,
            config.new_asteroids_per_second
        );

        Ok(Self {
            pool: AsteroidsPool::new(config.max_asteroids),
            spawner: SpawnController::new(),
            sorter: DepthSorter::with_capacity(config.max_asteroids),
            rng,
            config: config.clone(),
            texture_layers: 1,
        })
    }

    fn retirement_policy(&self) -> RetirementPolicy {
        RetirementPolicy {
            max_distance: self.config.retire_distance(),
            lifetime: self.config.lifetime,
        }
    }

    pub fn pool(&self) -> &AsteroidsPool {
        &self.pool
    }

    /// Indices du dernier tri en profondeur.
    pub fn depth_order(&self) -> &[usize] {
        self.sorter.order()
    }

    pub fn total_spawned(&self) -> u64 {
        self.spawner.total_spawned()
    }

    fn step(&mut self, dt: f32, center: Vec3) -> UpdateResult {
        let spawned = self.spawner.spawn(
            dt,
            center,
            &self.config,
            self.texture_layers,
            &mut self.pool,
            &mut self.rng,
        );

        let policy = self.retirement_policy();
        let retired = integrate(&mut self.pool, dt, center, &policy);
        if retired > 0 {
            debug!("{} asteroid(s) retired", retired);
        }

        UpdateResult {
            spawned,
            retired,
            alive: self.pool.alive_count(),
        }
    }

    fn apply_config(&mut self, new_config: &FieldConfig) -> Result<bool, FieldConfigError> {
        new_config.validate()?;

        let old_max = self.config.max_asteroids;
        let rate_changed =
            new_config.new_asteroids_per_second != self.config.new_asteroids_per_second;
        self.config = new_config.clone();

        if rate_changed {
            // le budget cumulé n'a de sens qu'à cadence constante
            self.spawner.reset();
        }

        let capacity_updated = new_config.max_asteroids != old_max;
        if capacity_updated {
            info!(
                "Reinitializing asteroids pool due to max_asteroids change: {} -> {}",
                old_max, new_config.max_asteroids
            );
            self.pool = AsteroidsPool::new(new_config.max_asteroids);
            self.sorter = DepthSorter::with_capacity(new_config.max_asteroids);
            self.spawner.reset();
        }

        if let Some(seed) = new_config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        Ok(capacity_updated)
    }
}

// ==================================
// Trait PhysicEngine
// ==================================
impl PhysicEngineIterator for PhysicEngineAsteroids {
    fn iter_alive_asteroids<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Asteroid> + 'a> {
        Box::new(self.pool.iter_alive().map(|(_, asteroid)| asteroid))
    }

    /// ✔ Zéro allocation : on suit simplement les indices du dernier tri.
    /// Les slots retirés depuis ce tri sont filtrés.
    fn iter_depth_sorted<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Asteroid> + 'a> {
        Box::new(
            self.sorter
                .order()
                .iter()
                .filter_map(move |&i| self.pool.get(i))
                .filter(|asteroid| asteroid.alive),
        )
    }
}

impl PhysicEngine for PhysicEngineAsteroids {
    fn update(&mut self, dt: f32, center: Vec3) -> UpdateResult {
        self.step(dt, center)
    }

    fn sort_by_depth(&mut self, camera_pos: Vec3) -> usize {
        self.sorter.sort(&mut self.pool, camera_pos).len()
    }

    fn kill_asteroid(&mut self, index: usize) -> bool {
        self.pool.release(index)
    }

    fn alive_count(&self) -> usize {
        self.pool.alive_count()
    }

    fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    fn set_texture_layers(&mut self, layers: u32) {
        self.texture_layers = layers.max(1);
    }

    fn reload_config(&mut self, config: &FieldConfig) -> Result<bool, FieldConfigError> {
        self.apply_config(config)
    }

    fn get_config(&self) -> &FieldConfig {
        &self.config
    }

    fn close(&mut self) {
        self.pool.clear();
        self.sorter.clear();
        self.spawner.reset();
        debug!("PhysicEngineAsteroids closed and reset.");
    }
}

impl PhysicEngineFull for PhysicEngineAsteroids {}

// ==================================
// Helpers pour tests
// ==================================
#[cfg(any(test, feature = "test_helpers"))]
pub trait PhysicEngineTestHelpers {
    /// Place un astéroïde vivant dans le prochain slot libre (balayage circulaire).
    fn inject_asteroid(&mut self, asteroid: Asteroid) -> Option<usize>;
    fn asteroid(&self, index: usize) -> Option<&Asteroid>;
    fn pool_cursor(&self) -> usize;
}

#[cfg(any(test, feature = "test_helpers"))]
impl PhysicEngineTestHelpers for PhysicEngineAsteroids {
    fn inject_asteroid(&mut self, asteroid: Asteroid) -> Option<usize> {
        self.pool.claim(asteroid)
    }

    fn asteroid(&self, index: usize) -> Option<&Asteroid> {
        self.pool.get(index).filter(|a| a.alive)
    }

    fn pool_cursor(&self) -> usize {
        self.pool.last_used()
    }
}
