use bytemuck::{Pod, Zeroable};
use gl::types::*;
use glam::{Mat4, Vec3};
use memoffset::offset_of;

use crate::physic_engine::Asteroid;

/// Structure envoyée au GPU représentant une instance d'astéroïde.
///
/// Chaque `AsteroidGPU` correspond à une *instance* du quad billboard,
/// stockée dans le VBO d'instanciation et lue par le *Vertex Shader*.
///
/// # Attributs GPU
///
/// | Location | Type   | Champs                          |
/// |:--------:|:-------|:--------------------------------|
/// | `0`      | `vec2` | coin du quad (VBO statique)     |
/// | `1`      | `vec4` | `pos_x`, `pos_y`, `pos_z`, `size` |
/// | `2`      | `vec2` | `texture_layer`, `brightness`   |
///
/// **Stride total** : `6 × f32 = 24 octets`
#[repr(C)] // garantit un layout C-compatible pour l’envoi GPU
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct AsteroidGPU {
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,

    /// Arête du billboard, en unités monde.
    pub size: f32,

    /// Couche du `GL_TEXTURE_2D_ARRAY` (stockée en flottant pour l'attribut).
    pub texture_layer: f32,

    /// Facteur multiplicatif appliqué à la couleur de la texture.
    pub brightness: f32,
}

impl From<&Asteroid> for AsteroidGPU {
    fn from(a: &Asteroid) -> Self {
        Self {
            pos_x: a.position.x,
            pos_y: a.position.y,
            pos_z: a.position.z,
            size: a.size,
            texture_layer: a.texture_layer as f32,
            brightness: a.brightness,
        }
    }
}

impl AsteroidGPU {
    /// Configure les attributs instanciés (divisor = 1) pour le VBO lié.
    ///
    /// ⚠️ Pré-requis : le VAO et le VBO d'instances doivent déjà être liés.
    ///
    /// # Safety
    /// Appels OpenGL directs : un contexte valide doit être courant.
    pub unsafe fn setup_vertex_attribs_for_instanced_quad() {
        let stride = std::mem::size_of::<Self>() as GLsizei;

        // layout(location = 1) : centre + taille (vec4)
        gl::VertexAttribPointer(
            1,
            4,
            gl::FLOAT,
            gl::FALSE,
            stride,
            offset_of!(Self, pos_x) as *const _,
        );
        gl::EnableVertexAttribArray(1);
        gl::VertexAttribDivisor(1, 1); // 🔑 une fois par astéroïde

        // layout(location = 2) : couche de texture + luminosité (vec2)
        gl::VertexAttribPointer(
            2,
            2,
            gl::FLOAT,
            gl::FALSE,
            stride,
            offset_of!(Self, texture_layer) as *const _,
        );
        gl::EnableVertexAttribArray(2);
        gl::VertexAttribDivisor(2, 1);
    }
}

/// Matrices et repère caméra d'une frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCamera {
    pub projection: Mat4,
    pub view: Mat4,
    pub position: Vec3,
    pub up: Vec3,
}

impl FrameCamera {
    /// Axe "droite" de la caméra en coordonnées monde (première ligne de la vue).
    pub fn right(&self) -> Vec3 {
        self.view.row(0).truncate().normalize_or_zero()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Remplit `dst` avec les instances GPU, dans l'ordre donné.
///
/// `dst` est vidé au préalable : aucune différence incrémentale n'est faite,
/// le contenu de la frame précédente est entièrement remplacé.
pub fn pack_instances<'a>(dst: &mut Vec<AsteroidGPU>, sorted: impl Iterator<Item = &'a Asteroid>) {
    dst.clear();
    dst.extend(sorted.map(AsteroidGPU::from));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_layout_is_packed() {
        assert_eq!(std::mem::size_of::<AsteroidGPU>(), 24);
        assert_eq!(offset_of!(AsteroidGPU, size), 12);
        assert_eq!(offset_of!(AsteroidGPU, texture_layer), 16);
    }

    #[test]
    fn test_camera_right_from_look_at() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        let camera = FrameCamera {
            projection: Mat4::IDENTITY,
            view,
            position: Vec3::new(0.0, 0.0, 10.0),
            up: Vec3::Y,
        };
        assert!(camera.right().abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_pack_replaces_previous_content() {
        let mut dst = vec![AsteroidGPU::default(); 5];
        let asteroids = [Asteroid {
            position: Vec3::new(1.0, 2.0, 3.0),
            size: 2.5,
            texture_layer: 1,
            alive: true,
            ..Default::default()
        }];
        pack_instances(&mut dst, asteroids.iter());
        assert_eq!(dst.len(), 1);
        assert_eq!(dst[0].pos_z, 3.0);
        assert_eq!(dst[0].texture_layer, 1.0);
    }
}
