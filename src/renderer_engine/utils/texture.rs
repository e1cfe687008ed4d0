use anyhow::{ensure, Context, Result};
use image::{imageops::FilterType, Rgba, RgbaImage};
use log::info;
use rand::Rng;
use std::path::Path;

/// Texture OpenGL `GL_TEXTURE_2D_ARRAY` : une couche par texture d'astéroïde.
#[derive(Debug)]
pub struct TextureArray {
    pub id: u32,
    pub layers: u32,
    pub size: u32,
}

impl TextureArray {
    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn delete(&mut self) {
        if self.id != 0 {
            gl::DeleteTextures(1, &self.id);
            self.id = 0;
        }
    }
}

/// Charge une image et la redimensionne en `size × size` (origine en bas à gauche).
pub fn load_layer_image(path: &Path, size: u32) -> Result<RgbaImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load texture '{}'", path.display()))?;
    Ok(img
        .resize_exact(size, size, FilterType::Triangle)
        .flipv() // OpenGL attend l'origine en bas à gauche
        .to_rgba8())
}

/// Génère une texture de roche procédurale : disque bruité aux bords adoucis,
/// parsemé de cratères plus sombres.
pub fn procedural_asteroid_layer<R: Rng>(size: u32, rng: &mut R) -> RgbaImage {
    let half = size as f32 / 2.0;
    let base = rng.random_range(0.45..0.75f32);

    let craters: Vec<(f32, f32, f32)> = (0..rng.random_range(3..8u32))
        .map(|_| {
            (
                rng.random_range(-0.6..0.6f32),
                rng.random_range(-0.6..0.6f32),
                rng.random_range(0.08..0.25f32),
            )
        })
        .collect();

    RgbaImage::from_fn(size, size, |x, y| {
        let u = (x as f32 + 0.5 - half) / half;
        let v = (y as f32 + 0.5 - half) / half;
        let r = (u * u + v * v).sqrt();

        let shadow = craters
            .iter()
            .filter(|(cu, cv, cr)| ((u - cu).powi(2) + (v - cv).powi(2)).sqrt() < *cr)
            .count() as f32
            * 0.12;
        let grain = rng.random_range(-0.06..0.06f32);
        let lum = ((base - shadow + grain) * (1.0 - 0.35 * r)).clamp(0.0, 1.0);
        let alpha = (1.0 - (r - 0.85) / 0.15).clamp(0.0, 1.0);

        let l = (lum * 255.0) as u8;
        Rgba([l, (l as f32 * 0.95) as u8, (l as f32 * 0.9) as u8, (alpha * 255.0) as u8])
    })
}

/// Concatène les couches (toutes de même taille) en un buffer RGBA8 contigu.
pub fn stack_layers(layers: &[RgbaImage]) -> Result<Vec<u8>> {
    let first = layers.first().context("No texture layer to upload")?;
    let dims = first.dimensions();
    ensure!(
        layers.iter().all(|l| l.dimensions() == dims),
        "All texture layers must share the same size"
    );
    Ok(layers.iter().flat_map(|l| l.as_raw().iter().copied()).collect())
}

/// Crée le `GL_TEXTURE_2D_ARRAY` à partir des fichiers donnés, ou de
/// `procedural_layers` couches procédurales si aucun chemin n'est fourni.
///
/// # Safety
/// Le contexte OpenGL doit être actif.
pub unsafe fn load_texture_array<R: Rng>(
    paths: &[String],
    size: u32,
    procedural_layers: u32,
    rng: &mut R,
) -> Result<TextureArray> {
    let layers: Vec<RgbaImage> = if paths.is_empty() {
        info!(
            "🪨 No asteroid texture configured: generating {} procedural layer(s)",
            procedural_layers.max(1)
        );
        (0..procedural_layers.max(1))
            .map(|_| procedural_asteroid_layer(size, &mut *rng))
            .collect()
    } else {
        paths
            .iter()
            .map(|p| load_layer_image(Path::new(p), size))
            .collect::<Result<_>>()?
    };

    let data = stack_layers(&layers)?;
    let count = layers.len() as u32;

    let mut tex_id = 0;
    gl::GenTextures(1, &mut tex_id);
    gl::BindTexture(gl::TEXTURE_2D_ARRAY, tex_id);

    gl::TexParameteri(gl::TEXTURE_2D_ARRAY, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
    gl::TexParameteri(gl::TEXTURE_2D_ARRAY, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
    gl::TexParameteri(
        gl::TEXTURE_2D_ARRAY,
        gl::TEXTURE_MIN_FILTER,
        gl::LINEAR_MIPMAP_LINEAR as i32,
    );
    gl::TexParameteri(gl::TEXTURE_2D_ARRAY, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);

    gl::TexImage3D(
        gl::TEXTURE_2D_ARRAY,
        0,
        gl::RGBA8 as i32,
        size as i32,
        size as i32,
        count as i32,
        0,
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        data.as_ptr() as *const _,
    );
    gl::GenerateMipmap(gl::TEXTURE_2D_ARRAY);
    gl::BindTexture(gl::TEXTURE_2D_ARRAY, 0);

    info!(
        "🎨 Texture array {} ready: {} layer(s) of {}x{}",
        tex_id, count, size, size
    );

    Ok(TextureArray {
        id: tex_id,
        layers: count,
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_procedural_layer_has_transparent_corners() {
        let mut rng = StdRng::seed_from_u64(3);
        let img = procedural_asteroid_layer(32, &mut rng);
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(16, 16)[3], 255);
    }

    #[test]
    fn test_stack_layers_rejects_mixed_sizes() {
        let a = RgbaImage::new(4, 4);
        let b = RgbaImage::new(8, 8);
        assert!(stack_layers(&[a.clone(), b]).is_err());
        assert_eq!(stack_layers(&[a.clone(), a]).unwrap().len(), 2 * 4 * 4 * 4);
        assert!(stack_layers(&[]).is_err());
    }

    #[test]
    fn test_missing_texture_file_is_an_error() {
        assert!(load_layer_image(Path::new("does/not/exist.png"), 16).is_err());
    }
}
