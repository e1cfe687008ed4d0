use anyhow::Result;
use glam::{Mat4, Vec3};
use log::info;

use crate::physic_engine::{
    FieldConfig, PhysicEngine, PhysicEngineAsteroids, PhysicEngineFull, UpdateResult,
};
use crate::renderer_engine::{pack_instances, AsteroidGPU, FrameCamera, RendererEngine};

/// 🪐 Champ d'astéroïdes : orchestre le moteur physique et le renderer.
///
/// Une frame se déroule toujours dans cet ordre :
/// 1. `update` : spawn puis intégration autour du centre courant ;
/// 2. `draw` : tri en profondeur → upload des instances → dessin instancié.
///
/// Le buffer de staging CPU (`staging`) est réutilisé d'une frame à l'autre.
pub struct AsteroidsField<P: PhysicEngineFull, R: RendererEngine> {
    physic: P,
    renderer: R,

    center: Vec3,
    camera_pos: Vec3,

    staging: Vec<AsteroidGPU>,
    last_update: UpdateResult,
}

impl<R: RendererEngine> AsteroidsField<PhysicEngineAsteroids, R> {
    /// Valide `config` et construit le moteur physique par défaut.
    pub fn new(config: &FieldConfig, renderer: R) -> Result<Self> {
        let physic = PhysicEngineAsteroids::new(config)?;
        Self::with_engines(physic, renderer)
    }
}

impl<P: PhysicEngineFull, R: RendererEngine> AsteroidsField<P, R> {
    /// Échoue si le renderer ne peut pas agrandir son buffer d'instances à
    /// la capacité du pool.
    pub fn with_engines(mut physic: P, mut renderer: R) -> Result<Self> {
        let capacity = physic.capacity();
        if renderer.max_instances() < capacity {
            renderer.recreate_buffers(capacity)?;
        }
        physic.set_texture_layers(renderer.texture_layers());

        let center = physic.get_config().center;
        info!(
            "🪐 Asteroids field ready: {} slot(s) around ({:.1}, {:.1}, {:.1})",
            capacity, center.x, center.y, center.z
        );

        Ok(Self {
            physic,
            renderer,
            center,
            camera_pos: Vec3::ZERO,
            staging: Vec::with_capacity(capacity),
            last_update: UpdateResult::default(),
        })
    }

    /// Avance la simulation autour du centre mémorisé (`set_center`).
    pub fn update(&mut self, dt: f32) -> UpdateResult {
        self.update_around(dt, self.center)
    }

    /// Avance la simulation autour de `center`, qui devient le centre courant.
    pub fn update_around(&mut self, dt: f32, center: Vec3) -> UpdateResult {
        self.center = center;
        self.last_update = self.physic.update(dt, center);
        self.last_update
    }

    /// Trie, envoie et dessine les astéroïdes vivants.
    /// Retourne le nombre d'instances dessinées.
    pub fn draw(
        &mut self,
        projection: Mat4,
        view: Mat4,
        camera_pos: Vec3,
        camera_up: Vec3,
    ) -> Result<usize> {
        self.camera_pos = camera_pos;

        self.physic.sort_by_depth(camera_pos);
        pack_instances(&mut self.staging, self.physic.iter_depth_sorted());

        let count = self.renderer.upload_instances(&self.staging)?;
        let camera = FrameCamera {
            projection,
            view,
            position: camera_pos,
            up: camera_up,
        };
        self.renderer.draw_instances(count, &camera)?;

        Ok(count)
    }

    /// Variante de `draw` utilisant la position caméra mémorisée (`set_camera`).
    pub fn render(&mut self, projection: Mat4, view: Mat4, camera_up: Vec3) -> Result<usize> {
        self.draw(projection, view, self.camera_pos, camera_up)
    }

    pub fn set_camera(&mut self, position: Vec3) {
        self.camera_pos = position;
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn kill_asteroid(&mut self, index: usize) -> bool {
        self.physic.kill_asteroid(index)
    }

    /// Recharge la configuration du champ. Si la capacité change, le pool est
    /// réinitialisé et le buffer GPU recréé à la nouvelle taille.
    ///
    /// Une config invalide remonte un [`FieldConfigError`](crate::physic_engine::FieldConfigError)
    /// (récupérable via `downcast_ref`), un échec de réallocation GPU remonte
    /// l'erreur OpenGL.
    pub fn reload_config(&mut self, config: &FieldConfig) -> Result<bool> {
        let capacity_changed = self.physic.reload_config(config)?;
        if capacity_changed {
            let capacity = self.physic.capacity();
            self.staging = Vec::with_capacity(capacity);
            self.renderer.recreate_buffers(capacity)?;
        }
        Ok(capacity_changed)
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    #[inline]
    pub fn camera(&self) -> Vec3 {
        self.camera_pos
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.physic.alive_count()
    }

    #[inline]
    pub fn last_update(&self) -> UpdateResult {
        self.last_update
    }

    pub fn physic(&self) -> &P {
        &self.physic
    }

    pub fn physic_mut(&mut self) -> &mut P {
        &mut self.physic
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn close(&mut self) {
        self.renderer.close();
        self.physic.close();
    }
}
