use anyhow::Result;

use crate::renderer_engine::RendererConfig;

pub type WindowEvents = glfw::GlfwReceiver<(f64, glfw::WindowEvent)>;

/// Fenêtre + contexte OpenGL.
pub trait WindowEngine {
    /// Crée la fenêtre, rend le contexte courant et charge les pointeurs OpenGL.
    fn init(config: &RendererConfig) -> Result<Self>
    where
        Self: Sized;

    fn poll_events(&mut self);
    fn swap_buffers(&mut self);
    fn should_close(&self) -> bool;
    fn set_should_close(&mut self, value: bool);
    fn get_framebuffer_size(&self) -> (i32, i32);
    fn make_current(&mut self);
    fn get_events(&self) -> &WindowEvents;
}
