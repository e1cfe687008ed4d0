// ------------------------
// UpdateResult
// ------------------------
/// Événements produits par un pas de simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    pub spawned: usize,
    pub retired: usize,
    pub alive: usize,
}
