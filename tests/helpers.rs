use asteroids_field::physic_engine::FieldConfig;
use asteroids_field::renderer_engine::{AsteroidGPU, FrameCamera, RendererEngine};
use std::cell::RefCell;
use std::rc::Rc;

/// Config déterministe et "immobile" : pas de dérive, graine fixe.
#[allow(dead_code)]
pub fn still_field_config(max_asteroids: usize) -> FieldConfig {
    FieldConfig {
        max_asteroids,
        min_radius: 10.0,
        max_radius: 50.0,
        new_asteroids_per_second: 5.0,
        max_speed: 0.0,
        seed: Some(42),
        ..Default::default()
    }
}

/// Renderer sans GPU : journalise les appels et garde la dernière frame envoyée.
#[allow(dead_code)]
pub struct LoggingRenderer {
    pub log: Rc<RefCell<Vec<String>>>,
    pub uploaded: Vec<AsteroidGPU>,
    pub drawn: Vec<usize>,
    pub max_instances: usize,
    pub layers: u32,
}

#[allow(dead_code)]
impl LoggingRenderer {
    pub fn new(log: Rc<RefCell<Vec<String>>>, max_instances: usize) -> Self {
        Self {
            log,
            uploaded: Vec::new(),
            drawn: Vec::new(),
            max_instances,
            layers: 4,
        }
    }
}

impl RendererEngine for LoggingRenderer {
    fn begin_frame(&mut self) {
        self.log.borrow_mut().push("renderer.begin_frame".into());
    }

    fn upload_instances(&mut self, instances: &[AsteroidGPU]) -> anyhow::Result<usize> {
        anyhow::ensure!(
            instances.len() <= self.max_instances,
            "upload overflow: {} > {}",
            instances.len(),
            self.max_instances
        );
        self.log
            .borrow_mut()
            .push(format!("renderer.upload {}", instances.len()));
        self.uploaded = instances.to_vec();
        Ok(instances.len())
    }

    fn draw_instances(&mut self, count: usize, _camera: &FrameCamera) -> anyhow::Result<()> {
        if count == 0 {
            self.log.borrow_mut().push("renderer.skip_draw".into());
            return Ok(());
        }
        self.log.borrow_mut().push(format!("renderer.draw {}", count));
        self.drawn.push(count);
        Ok(())
    }

    fn texture_layers(&self) -> u32 {
        self.layers
    }

    fn max_instances(&self) -> usize {
        self.max_instances
    }

    fn recreate_buffers(&mut self, new_max: usize) -> anyhow::Result<()> {
        self.log
            .borrow_mut()
            .push(format!("renderer.recreate_buffers {}", new_max));
        self.max_instances = new_max;
        Ok(())
    }

    fn set_window_size(&mut self, _width: i32, _height: i32) {}

    fn reload_shaders(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("renderer.close".into());
    }
}

/// Renderer dont l'upload et la réallocation échouent systématiquement
/// (ex: GL_OUT_OF_MEMORY).
#[allow(dead_code)]
pub struct FailingRenderer {
    pub draw_calls: usize,
    pub max_instances: usize,
}

impl Default for FailingRenderer {
    fn default() -> Self {
        Self {
            draw_calls: 0,
            max_instances: usize::MAX,
        }
    }
}

impl RendererEngine for FailingRenderer {
    fn begin_frame(&mut self) {}

    fn upload_instances(&mut self, _instances: &[AsteroidGPU]) -> anyhow::Result<usize> {
        anyhow::bail!("OpenGL error during instance upload: GL_OUT_OF_MEMORY (0x505)")
    }

    fn draw_instances(&mut self, _count: usize, _camera: &FrameCamera) -> anyhow::Result<()> {
        self.draw_calls += 1;
        Ok(())
    }

    fn texture_layers(&self) -> u32 {
        1
    }

    fn max_instances(&self) -> usize {
        self.max_instances
    }

    fn recreate_buffers(&mut self, _new_max: usize) -> anyhow::Result<()> {
        self.max_instances = 0;
        anyhow::bail!("OpenGL error during instance buffer reallocation: GL_OUT_OF_MEMORY (0x505)")
    }

    fn set_window_size(&mut self, _width: i32, _height: i32) {}

    fn reload_shaders(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn close(&mut self) {}
}
