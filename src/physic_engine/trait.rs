use glam::Vec3;

use crate::physic_engine::asteroid::Asteroid;
use crate::physic_engine::config::{FieldConfig, FieldConfigError};
use crate::physic_engine::types::UpdateResult;

pub trait PhysicEngineIterator {
    /// Retourne un itérateur sur les astéroïdes vivants (ordre des slots).
    fn iter_alive_asteroids<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Asteroid> + 'a>;

    /// Retourne un itérateur sur les astéroïdes vivants dans l'ordre du dernier
    /// tri en profondeur (du plus lointain au plus proche).
    fn iter_depth_sorted<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Asteroid> + 'a>;
}

/// 🔧 Trait `PhysicEngine`
///
/// Interface commune aux moteurs de simulation du champ d'astéroïdes.
/// La caméra et le centre du champ sont passés explicitement à chaque appel :
/// aucun état implicite entre `update` et `sort_by_depth`, ce qui rend une
/// frame déterministe et testable.
pub trait PhysicEngine {
    /// Fait avancer la simulation de `dt` secondes autour de `center`
    /// (spawn puis intégration du mouvement).
    fn update(&mut self, dt: f32, center: Vec3) -> UpdateResult;

    /// Recalcule les distances caméra et trie les astéroïdes vivants
    /// du plus lointain au plus proche. Retourne le nombre trié.
    fn sort_by_depth(&mut self, camera_pos: Vec3) -> usize;

    /// Retire un astéroïde (ex: détruit par un système de collision externe).
    fn kill_asteroid(&mut self, index: usize) -> bool;

    fn alive_count(&self) -> usize;

    fn capacity(&self) -> usize;

    /// Nombre de textures disponibles pour le tirage de `texture_layer`.
    fn set_texture_layers(&mut self, layers: u32);

    /// Recharge la configuration. Retourne `Ok(true)` si la capacité a changé
    /// (le pool a été réinitialisé).
    fn reload_config(&mut self, config: &FieldConfig) -> Result<bool, FieldConfigError>;

    fn get_config(&self) -> &FieldConfig;

    /// Ferme / libère le moteur physique.
    fn close(&mut self) {} // Par défaut, fait rien.
}

pub trait PhysicEngineFull: PhysicEngine + PhysicEngineIterator {}
