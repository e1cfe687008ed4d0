use glam::Vec3;

/// Un astéroïde du champ (élément du pool).
///
/// Un slot avec `alive == false` est libre : son contenu n'a pas de sens
/// tant qu'il n'est pas réalloué par le `SpawnController`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub position: Vec3,
    pub velocity: Vec3,
    pub size: f32,
    pub radius: f32,

    /// Distance à la caméra, recalculée avant chaque tri.
    /// Valeur dérivée : valide seulement juste après un passage du `DepthSorter`.
    pub camera_distance: f32,

    /// Secondes écoulées depuis le spawn
    pub age: f32,
    pub texture_layer: u32,
    pub brightness: f32,

    pub alive: bool,
}

impl Default for Asteroid {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            size: 0.0,
            radius: 0.0,
            camera_distance: -1.0,
            age: 0.0,
            texture_layer: 0,
            brightness: 1.0,
            alive: false,
        }
    }
}

impl Asteroid {
    #[inline(always)]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}
