pub mod r#trait;
pub use r#trait::{PhysicEngine, PhysicEngineFull, PhysicEngineIterator};

pub mod types;
pub use self::types::UpdateResult;

pub mod asteroid;
pub use self::asteroid::Asteroid;

pub mod config;
pub use self::config::{FieldConfig, FieldConfigError};

pub mod asteroids_pool;
pub use self::asteroids_pool::AsteroidsPool;

pub mod spawn_controller;
pub use self::spawn_controller::SpawnController;

pub mod motion_integrator;
pub mod depth_sorter;
pub use self::depth_sorter::DepthSorter;

pub mod physic_engine_asteroids;
pub use self::physic_engine_asteroids::PhysicEngineAsteroids;
