#[cfg(debug_assertions)]
use log::debug;

use crate::physic_engine::asteroid::Asteroid;

/// Pool de taille fixe contenant tous les astéroïdes du champ.
///
/// # Rôle
/// Le `AsteroidsPool` maintient un unique vecteur de `Asteroid` alloué une
/// seule fois à la construction (pas d'allocation par objet). Un slot est
/// libre quand `alive == false`.
///
/// L'allocation se fait par balayage circulaire à partir du dernier slot
/// utilisé (`last_used`) : quand le pool n'est pas plein, le slot libre est
/// en général trouvé en quelques pas, et les slots libérés près du curseur
/// sont réutilisés en priorité.
#[derive(Debug)]
pub struct AsteroidsPool {
    /// Stockage de tous les slots
    asteroids: Vec<Asteroid>,

    /// Index du dernier slot alloué (curseur du balayage circulaire)
    last_used: usize,

    /// Nombre de slots vivants
    alive_count: usize,
}

impl AsteroidsPool {
    /// Crée un pool de `capacity` slots, tous libres.
    ///
    /// Le curseur démarre sur le dernier slot pour que la première
    /// allocation retourne le slot 0.
    pub fn new(capacity: usize) -> Self {
        #[cfg(debug_assertions)]
        debug!("AsteroidsPool initialized with {} slots", capacity);

        Self {
            asteroids: vec![Asteroid::default(); capacity],
            last_used: capacity.saturating_sub(1),
            alive_count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.asteroids.len()
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.alive_count == self.capacity()
    }

    #[inline]
    pub fn last_used(&self) -> usize {
        self.last_used
    }

    /// Cherche un slot libre à partir de `last_used + 1`, modulo la capacité.
    ///
    /// Retourne `None` si un tour complet ne trouve aucun slot libre.
    /// Ne modifie pas le pool.
    pub fn find_unused(&self) -> Option<usize> {
        let capacity = self.capacity();
        if self.is_full() {
            return None;
        }
        (1..=capacity)
            .map(|offset| (self.last_used + offset) % capacity)
            .find(|&i| !self.asteroids[i].alive)
    }

    /// Réserve un slot libre et y place `asteroid` (marqué vivant).
    ///
    /// Retourne l'index du slot, ou `None` si le pool est épuisé
    /// (échec "soft" : l'appelant saute simplement ce spawn).
    /// Complexité amortie : **O(1)** tant que le pool n'est pas saturé.
    pub fn claim(&mut self, asteroid: Asteroid) -> Option<usize> {
        let index = self.find_unused()?;
        self.asteroids[index] = Asteroid {
            alive: true,
            ..asteroid
        };
        self.last_used = index;
        self.alive_count += 1;
        Some(index)
    }

    /// Libère un slot. Retourne `false` si l'index est hors limites ou déjà libre.
    pub fn release(&mut self, index: usize) -> bool {
        match self.asteroids.get_mut(index) {
            Some(asteroid) if asteroid.alive => {
                asteroid.alive = false;
                asteroid.camera_distance = -1.0;
                self.alive_count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Libère tous les slots.
    pub fn clear(&mut self) {
        for asteroid in self.asteroids.iter_mut() {
            asteroid.alive = false;
            asteroid.camera_distance = -1.0;
        }
        self.alive_count = 0;
        self.last_used = self.capacity().saturating_sub(1);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Asteroid> {
        self.asteroids.get(index)
    }

    /// Accès à tous les slots (vivants ou non).
    #[inline]
    pub fn slots(&self) -> &[Asteroid] {
        &self.asteroids
    }

    /// Itère sur les astéroïdes vivants avec leur index de slot.
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, &Asteroid)> {
        self.asteroids
            .iter()
            .enumerate()
            .filter(|(_, asteroid)| asteroid.alive)
    }

    /// Itère mutablement sur les astéroïdes vivants avec leur index de slot.
    ///
    /// ⚠️ Réservé à l'intégrateur et au tri : le champ `alive` ne doit jamais
    /// être modifié par cet itérateur, sinon `alive_count` diverge. Passer
    /// par [`AsteroidsPool::release`] pour libérer un slot.
    pub(crate) fn iter_alive_mut(&mut self) -> impl Iterator<Item = (usize, &mut Asteroid)> {
        self.asteroids
            .iter_mut()
            .enumerate()
            .filter(|(_, asteroid)| asteroid.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_claim_takes_slot_zero() {
        let mut pool = AsteroidsPool::new(4);
        assert_eq!(pool.claim(Asteroid::default()), Some(0));
        assert_eq!(pool.claim(Asteroid::default()), Some(1));
        assert_eq!(pool.alive_count(), 2);
        assert_eq!(pool.last_used(), 1);
    }

    #[test]
    fn test_release_twice_is_noop() {
        let mut pool = AsteroidsPool::new(2);
        let i = pool.claim(Asteroid::default()).unwrap();
        assert!(pool.release(i));
        assert!(!pool.release(i));
        assert!(!pool.release(42));
        assert_eq!(pool.alive_count(), 0);
    }

    fn counted_alive(pool: &AsteroidsPool) -> usize {
        pool.slots().iter().filter(|a| a.alive).count()
    }

    #[test]
    fn test_alive_count_matches_slots() {
        use crate::physic_engine::depth_sorter::DepthSorter;
        use crate::physic_engine::motion_integrator::{integrate, RetirementPolicy};
        use glam::Vec3;

        let mut pool = AsteroidsPool::new(6);
        for x in [1.0, 2.0, 30.0, 4.0] {
            pool.claim(Asteroid {
                position: Vec3::new(x, 0.0, 0.0),
                velocity: Vec3::X,
                ..Default::default()
            });
        }
        assert_eq!(pool.alive_count(), counted_alive(&pool));

        pool.release(1);
        pool.release(1);
        assert_eq!(pool.alive_count(), counted_alive(&pool));

        // seul l'astéroïde à x = 30 dépasse la distance max
        let policy = RetirementPolicy {
            max_distance: 10.0,
            lifetime: None,
        };
        assert_eq!(integrate(&mut pool, 1.0, Vec3::ZERO, &policy), 1);
        assert_eq!(pool.alive_count(), 2);
        assert_eq!(pool.alive_count(), counted_alive(&pool));

        let mut sorter = DepthSorter::with_capacity(6);
        assert_eq!(sorter.sort(&mut pool, Vec3::ZERO).len(), pool.alive_count());
        assert_eq!(pool.alive_count(), counted_alive(&pool));

        pool.claim(Asteroid::default());
        pool.clear();
        assert_eq!(pool.alive_count(), counted_alive(&pool));
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut pool = AsteroidsPool::new(3);
        pool.claim(Asteroid::default());
        pool.claim(Asteroid::default());
        pool.clear();
        assert_eq!(pool.alive_count(), 0);
        assert_eq!(pool.claim(Asteroid::default()), Some(0));
    }
}
