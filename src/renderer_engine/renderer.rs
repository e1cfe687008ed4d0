use anyhow::Result;
use log::info;

use crate::renderer_engine::config::RendererConfig;
use crate::renderer_engine::renderer_graphics_instanced::RendererGraphicsInstanced;
use crate::renderer_engine::types::{AsteroidGPU, FrameCamera};
use crate::renderer_engine::RendererEngine;

/// Renderer OpenGL : efface la frame et délègue le dessin des billboards
/// au rendu instancié.
///
/// ⚠️ Le contexte OpenGL doit être créé (et courant) avant `Renderer::new`.
pub struct Renderer {
    config: RendererConfig,
    instanced: RendererGraphicsInstanced,
    window_size: (i32, i32),
}

impl Renderer {
    pub fn new(max_instances_on_gpu: usize, config: &RendererConfig) -> Result<Self> {
        let instanced = RendererGraphicsInstanced::new(max_instances_on_gpu, config)?;
        let window_size = (config.window_width, config.window_height);

        unsafe {
            gl::Viewport(0, 0, window_size.0, window_size.1);
        }
        info!(
            "✅ Renderer ready: {} instance(s) max, {} texture layer(s)",
            max_instances_on_gpu,
            instanced.texture_layers()
        );

        Ok(Self {
            config: config.clone(),
            instanced,
            window_size,
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn window_size(&self) -> (i32, i32) {
        self.window_size
    }
}

impl RendererEngine for Renderer {
    fn begin_frame(&mut self) {
        let [r, g, b, a] = self.config.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn upload_instances(&mut self, instances: &[AsteroidGPU]) -> Result<usize> {
        unsafe { self.instanced.upload(instances) }
    }

    fn draw_instances(&mut self, count: usize, camera: &FrameCamera) -> Result<()> {
        unsafe { self.instanced.draw(count, camera) }
    }

    fn texture_layers(&self) -> u32 {
        self.instanced.texture_layers()
    }

    fn max_instances(&self) -> usize {
        self.instanced.max_instances()
    }

    fn recreate_buffers(&mut self, new_max: usize) -> Result<()> {
        if new_max == self.instanced.max_instances() {
            return Ok(());
        }
        info!(
            "🔁 GPU buffer reallocation required ({} → {})",
            self.instanced.max_instances(),
            new_max
        );
        unsafe { self.instanced.recreate_buffers(new_max) }
    }

    fn set_window_size(&mut self, width: i32, height: i32) {
        self.window_size = (width, height);
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
    }

    fn reload_shaders(&mut self) -> Result<()> {
        unsafe { self.instanced.reload_shaders(&self.config) }
    }

    fn close(&mut self) {
        info!("🧹 Fermeture du Renderer");
        unsafe {
            self.instanced.close();
        }
    }
}
