use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Erreurs de validation de la configuration du champ d'astéroïdes.
///
/// Toutes ces erreurs sont détectées à la construction (ou au rechargement)
/// du moteur : une configuration invalide ne doit jamais produire une
/// géométrie de spawn absurde.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldConfigError {
    #[error("max_asteroids must be greater than zero")]
    ZeroCapacity,

    #[error("invalid spawn shell: min_radius ({min}) > max_radius ({max})")]
    InvertedShell { min: f32, max: f32 },

    #[error("invalid {name} range: [{min}, {max}]")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must be finite and >= 0 (got {value})")]
    Negative { name: &'static str, value: f32 },

    #[error("lifetime must be finite and > 0 (got {0})")]
    InvalidLifetime(f32),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Nombre de slots du pool (capacité fixe)
    pub max_asteroids: usize,

    /// Coquille sphérique de spawn autour du centre
    pub min_radius: f32,
    pub max_radius: f32,

    pub new_asteroids_per_second: f32,
    pub max_speed: f32,

    /// Taille rendue (arête du billboard)
    pub min_size: f32,
    pub max_size: f32,

    pub min_asteroid_radius: f32,
    pub max_asteroid_radius: f32,

    /// Distance au-delà de `max_radius` à partir de laquelle un astéroïde est retiré
    pub retire_margin: f32,

    /// Durée de vie en secondes (absente = pas de limite)
    pub lifetime: Option<f32>,

    /// Centre initial du champ
    pub center: Vec3,

    /// Graine du générateur aléatoire (absente = graine OS)
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_asteroids: 100,
            min_radius: 10.0,
            max_radius: 50.0,
            new_asteroids_per_second: 5.0,
            max_speed: 0.2,
            min_size: 1.0,
            max_size: 4.0,
            min_asteroid_radius: 0.5,
            max_asteroid_radius: 2.0,
            retire_margin: 5.0,
            lifetime: None,
            center: Vec3::ZERO,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Vérifie la cohérence de la configuration.
    pub fn validate(&self) -> Result<(), FieldConfigError> {
        if self.max_asteroids == 0 {
            return Err(FieldConfigError::ZeroCapacity);
        }

        for (name, value) in [
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
            ("new_asteroids_per_second", self.new_asteroids_per_second),
            ("max_speed", self.max_speed),
            ("min_size", self.min_size),
            ("max_size", self.max_size),
            ("min_asteroid_radius", self.min_asteroid_radius),
            ("max_asteroid_radius", self.max_asteroid_radius),
            ("retire_margin", self.retire_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FieldConfigError::Negative { name, value });
            }
        }

        if self.min_radius > self.max_radius {
            return Err(FieldConfigError::InvertedShell {
                min: self.min_radius,
                max: self.max_radius,
            });
        }

        for (name, min, max) in [
            ("size", self.min_size, self.max_size),
            (
                "asteroid radius",
                self.min_asteroid_radius,
                self.max_asteroid_radius,
            ),
        ] {
            if min > max {
                return Err(FieldConfigError::InvertedRange { name, min, max });
            }
        }

        if let Some(lifetime) = self.lifetime {
            if !lifetime.is_finite() || lifetime <= 0.0 {
                return Err(FieldConfigError::InvalidLifetime(lifetime));
            }
        }

        Ok(())
    }

    /// Distance au centre au-delà de laquelle un astéroïde est retiré.
    #[inline]
    pub fn retire_distance(&self) -> f32 {
        self.max_radius + self.retire_margin
    }
}
