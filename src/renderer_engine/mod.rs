pub mod r#trait;
pub use r#trait::RendererEngine;

pub mod config;
pub use self::config::RendererConfig;

pub mod renderer;
pub use self::renderer::Renderer;
pub mod renderer_graphics_instanced;
pub use self::renderer_graphics_instanced::RendererGraphicsInstanced;

pub mod shader;
pub use self::shader::ShaderProgram;

pub mod tools;
pub use self::tools::show_opengl_context_info;

pub mod types;
pub use self::types::{pack_instances, AsteroidGPU, FrameCamera};

pub mod utils;
