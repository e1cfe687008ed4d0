use crate::asteroids_field::AsteroidsField;
use crate::physic_engine::{
    FieldConfig, FieldConfigError, PhysicEngine, PhysicEngineFull, PhysicEngineIterator,
};
use crate::renderer_engine::{RendererConfig, RendererEngine};
use crate::window_engine::WindowEngine;
use anyhow::Result;
use glam::{Mat4, Vec3};
use glfw::{Action, Key};
use itertools::{Itertools, MinMaxResult};
use log::{error, info, warn};
use std::time::{Duration, Instant};

pub const FIELD_CONFIG_PATH: &str = "assets/config/field.toml";
pub const RENDERER_CONFIG_PATH: &str = "assets/config/renderer.toml";

const LOG_INTERVAL: Duration = Duration::from_secs(5);
/// Borne le déplacement du vaisseau et de la caméra après une frame perdue
/// (fenêtre déplacée, breakpoint…).
const MAX_FRAME_DT: f32 = 0.25;

/// Découpe le temps réel écoulé en `(dt_simulation, dt_mouvement)`.
///
/// Le champ reçoit le temps écoulé complet pour que le budget de spawn reste
/// fidèle au taux configuré. Seul le mouvement du vaisseau et de la caméra
/// est borné par [`MAX_FRAME_DT`].
pub fn frame_dts(elapsed: f32) -> (f32, f32) {
    let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
    (elapsed, elapsed.min(MAX_FRAME_DT))
}

/// Caméra orbitale autour du centre du champ : position et matrice de vue.
pub fn orbit_camera(center: Vec3, angle: f32, config: &RendererConfig) -> (Vec3, Mat4) {
    let offset = Vec3::new(
        angle.cos() * config.camera_distance,
        config.camera_height,
        angle.sin() * config.camera_distance,
    );
    let position = center + offset;
    (position, Mat4::look_at_rh(position, center, Vec3::Y))
}

pub fn projection(config: &RendererConfig, aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_rh_gl(
        config.fov_y_degrees.to_radians(),
        aspect_ratio,
        config.z_near,
        config.z_far,
    )
}

pub struct Simulator<P, R, W>
where
    P: PhysicEngineFull,
    R: RendererEngine,
    W: WindowEngine,
{
    field: AsteroidsField<P, R>,
    window_engine: W,
    renderer_config: RendererConfig,

    // Loop state
    frames: u64,
    last_time: Instant,
    last_log: Instant,
    orbit_angle: f32,
    aspect_ratio: f32,
    fps_avg: f32,
    first_frame: bool,
}

impl<P, R, W> Simulator<P, R, W>
where
    P: PhysicEngineFull,
    R: RendererEngine,
    W: WindowEngine,
{
    pub fn new(field: AsteroidsField<P, R>, window_engine: W, renderer_config: RendererConfig) -> Self {
        let (w, h) = window_engine.get_framebuffer_size();
        Self {
            field,
            window_engine,
            aspect_ratio: w.max(1) as f32 / h.max(1) as f32,
            renderer_config,
            frames: 0,
            last_time: Instant::now(),
            last_log: Instant::now(),
            orbit_angle: 0.0,
            fps_avg: 0.0,
            first_frame: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    /// Une frame complète. Retourne `Ok(false)` quand la fenêtre doit se fermer.
    pub fn step(&mut self) -> Result<bool> {
        if self.window_engine.should_close() {
            return Ok(false);
        }

        let mut reload_config = false;
        let mut reload_shaders = false;

        self.window_engine.poll_events();
        let events: Vec<_> = glfw::flush_messages(self.window_engine.get_events()).collect();
        for (_, event) in events {
            match event {
                glfw::WindowEvent::FramebufferSize(w, h) => {
                    self.field.renderer_mut().set_window_size(w, h);
                    self.aspect_ratio = w.max(1) as f32 / h.max(1) as f32;
                }
                glfw::WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                    self.window_engine.set_should_close(true);
                }
                glfw::WindowEvent::Key(Key::R, _, Action::Press, _) => reload_config = true,
                glfw::WindowEvent::Key(Key::S, _, Action::Press, _) => reload_shaders = true,
                _ => {}
            }
        }
        if reload_config {
            self.reload_config()?;
        }
        if reload_shaders {
            self.reload_shaders();
        }

        let now = Instant::now();
        let (dt, motion_dt) = frame_dts(now.duration_since(self.last_time).as_secs_f32());
        self.last_time = now;
        self.frames += 1;

        // 🚀 le vaisseau avance, le champ le suit
        let ship_velocity = Vec3::from_array(self.renderer_config.ship_velocity);
        let center = self.field.center() + ship_velocity * motion_dt;
        self.field.update_around(dt, center);

        self.orbit_angle += self.renderer_config.camera_orbit_speed * motion_dt;
        let (camera_pos, view) = orbit_camera(center, self.orbit_angle, &self.renderer_config);
        let projection = projection(&self.renderer_config, self.aspect_ratio);

        self.field.renderer_mut().begin_frame();
        self.field.draw(projection, view, camera_pos, Vec3::Y)?;

        if dt > 0.0 {
            let alpha = 0.15;
            self.fps_avg = alpha * (1.0 / dt) + (1.0 - alpha) * self.fps_avg;
        }
        if self.last_log.elapsed() >= LOG_INTERVAL {
            self.log_stats();
            self.last_log = Instant::now();
        }

        self.window_engine.swap_buffers();

        if self.first_frame {
            info!("🚀 First frame rendered");
            self.first_frame = false;
        }

        Ok(true)
    }

    fn log_stats(&self) {
        let physic = self.field.physic();
        info!(
            "FPS moyen (EMA): {:.2} | frames: {} | asteroids: {} / {}",
            self.fps_avg,
            self.frames,
            physic.alive_count(),
            physic.capacity()
        );
        let distances = physic
            .iter_alive_asteroids()
            .map(|a| a.camera_distance)
            .minmax_by(f32::total_cmp);
        match distances {
            MinMaxResult::MinMax(near, far) => {
                info!("  camera distance: nearest {:.1}, farthest {:.1}", near, far)
            }
            MinMaxResult::OneElement(d) => info!("  camera distance: {:.1}", d),
            MinMaxResult::NoElements => {}
        }
    }

    /// Relit la config du champ depuis le disque.
    ///
    /// Un fichier illisible ou une config invalide sont seulement loggés ;
    /// un échec de réallocation GPU remonte à l'appelant.
    pub fn reload_config(&mut self) -> Result<()> {
        let field_config = match FieldConfig::from_file(FIELD_CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                warn!("⚠️ Could not read '{}': {:#}", FIELD_CONFIG_PATH, e);
                return Ok(());
            }
        };
        info!("Field config loaded:\n{:#?}", field_config);

        match self.field.reload_config(&field_config) {
            Ok(true) => info!("🔁 Pool reset to {} slot(s)", field_config.max_asteroids),
            Ok(false) => {}
            Err(e) if e.is::<FieldConfigError>() => error!("❌ Field config rejected: {}", e),
            Err(e) => return Err(e.context("GPU buffer reallocation after config reload")),
        }
        Ok(())
    }

    pub fn reload_shaders(&mut self) {
        info!("🔄 Reloading shaders...");
        match self.field.renderer_mut().reload_shaders() {
            Ok(_) => info!("✅ Shaders reloaded successfully"),
            Err(e) => error!("❌ Shader reload failed:\n{:#}", e),
        }
    }

    pub fn close(&mut self) {
        self.field.close();
        // Window engine cleanup happens automatically when dropped
    }

    pub fn field(&self) -> &AsteroidsField<P, R> {
        &self.field
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_camera_keeps_distance_and_looks_at_center() {
        let config = RendererConfig::default();
        let center = Vec3::new(5.0, -3.0, 12.0);
        let (pos, view) = orbit_camera(center, 1.3, &config);

        let horizontal = Vec3::new(pos.x - center.x, 0.0, pos.z - center.z).length();
        assert!((horizontal - config.camera_distance).abs() < 1e-3);
        assert!((pos.y - center.y - config.camera_height).abs() < 1e-4);

        // le centre doit être devant la caméra (z < 0 en espace vue)
        let in_view = view.transform_point3(center);
        assert!(in_view.z < 0.0);
        assert!(in_view.x.abs() < 1e-3 && in_view.y.abs() < 1e-3);
    }

    #[test]
    fn test_long_frame_keeps_full_simulation_dt() {
        let (dt, motion_dt) = frame_dts(2.0);
        assert_eq!(dt, 2.0);
        assert_eq!(motion_dt, MAX_FRAME_DT);

        assert_eq!(frame_dts(0.016), (0.016, 0.016));
        assert_eq!(frame_dts(-1.0), (0.0, 0.0));
        assert_eq!(frame_dts(f32::NAN), (0.0, 0.0));
    }

    #[test]
    fn test_projection_is_finite() {
        let m = projection(&RendererConfig::default(), 16.0 / 9.0);
        assert!(m.is_finite());
    }
}
