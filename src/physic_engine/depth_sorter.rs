use glam::Vec3;

use crate::physic_engine::asteroids_pool::AsteroidsPool;

/// Ordonne les astéroïdes vivants du plus lointain au plus proche de la caméra.
///
/// L'ordre "back-to-front" est nécessaire pour le blending alpha.
/// Le vecteur d'indices est conservé entre les frames pour éviter une
/// allocation par frame.
#[derive(Debug, Default)]
pub struct DepthSorter {
    order: Vec<usize>,
}

impl DepthSorter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
        }
    }

    /// Recalcule `camera_distance` pour chaque astéroïde vivant, puis trie
    /// leurs indices par distance décroissante. Les slots libres sont exclus.
    ///
    /// Tri instable : les égalités sont départagées arbitrairement.
    pub fn sort(&mut self, pool: &mut AsteroidsPool, camera_pos: Vec3) -> &[usize] {
        self.order.clear();
        for (index, asteroid) in pool.iter_alive_mut() {
            asteroid.camera_distance = asteroid.distance_to(camera_pos);
            self.order.push(index);
        }

        let slots = pool.slots();
        self.order.sort_unstable_by(|&a, &b| {
            slots[b]
                .camera_distance
                .total_cmp(&slots[a].camera_distance)
        });

        &self.order
    }

    /// Dernier ordre calculé (peut référencer des slots retirés depuis).
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}
