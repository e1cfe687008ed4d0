use crate::renderer_engine::types::{AsteroidGPU, FrameCamera};

use anyhow::Result;

/// Back-end de rendu des astéroïdes : reçoit des instances déjà triées
/// (de la plus lointaine à la plus proche) et les dessine.
///
/// Le contrat d'une frame est `upload_instances` puis `draw_instances`
/// avec exactement le nombre renvoyé par l'upload.
pub trait RendererEngine {
    /// Efface les buffers couleur et profondeur de la frame.
    fn begin_frame(&mut self);

    /// Remplace intégralement le contenu du buffer d'instances.
    /// Retourne le nombre d'instances envoyées.
    fn upload_instances(&mut self, instances: &[AsteroidGPU]) -> Result<usize>;

    /// Dessine les `count` premières instances. `count == 0` ne dessine rien.
    fn draw_instances(&mut self, count: usize, camera: &FrameCamera) -> Result<()>;

    /// Nombre de couches disponibles dans la texture array.
    fn texture_layers(&self) -> u32;

    fn max_instances(&self) -> usize;
    /// Réalloue le buffer d'instances. En cas d'échec, le renderer ne doit
    /// plus annoncer l'ancienne capacité.
    fn recreate_buffers(&mut self, new_max: usize) -> Result<()>;
    fn set_window_size(&mut self, width: i32, height: i32);
    fn reload_shaders(&mut self) -> Result<()>;
    fn close(&mut self);
}
