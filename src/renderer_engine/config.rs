use serde::{Deserialize, Serialize};

/// Configuration de la fenêtre, de la caméra orbitale et des ressources de rendu.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RendererConfig {
    pub window_width: i32,
    pub window_height: i32,
    pub title: String,
    pub vsync: bool,
    pub clear_color: [f32; 4],

    /// Fichiers image, une couche de texture chacun. Vide ⇒ couches procédurales.
    pub texture_paths: Vec<String>,
    pub texture_size: u32,
    pub procedural_layers: u32,

    pub vertex_shader: String,
    pub fragment_shader: String,

    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,

    // Caméra orbitale de la démo
    pub camera_distance: f32,
    pub camera_height: f32,
    /// radians / seconde
    pub camera_orbit_speed: f32,
    /// Déplacement du centre du champ (le vaisseau), en unités / seconde.
    pub ship_velocity: [f32; 3],
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 800,
            title: "Asteroids Field".into(),
            vsync: true,
            clear_color: [0.01, 0.01, 0.03, 1.0],
            texture_paths: Vec::new(),
            texture_size: 128,
            procedural_layers: 4,
            vertex_shader: "assets/shaders/asteroid_billboard.vert.glsl".into(),
            fragment_shader: "assets/shaders/asteroid_billboard.frag.glsl".into(),
            fov_y_degrees: 60.0,
            z_near: 0.1,
            z_far: 500.0,
            camera_distance: 90.0,
            camera_height: 20.0,
            camera_orbit_speed: 0.1,
            ship_velocity: [0.0, 0.0, -2.0],
        }
    }
}

impl RendererConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window_width.max(1) as f32 / self.window_height.max(1) as f32
    }
}
