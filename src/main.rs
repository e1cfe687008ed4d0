use anyhow::Result;
use log::info;

use asteroids_field::physic_engine::FieldConfig;
use asteroids_field::renderer_engine::{Renderer, RendererConfig};
use asteroids_field::simulator::{FIELD_CONFIG_PATH, RENDERER_CONFIG_PATH};
use asteroids_field::utils::show_rust_core_dependencies;
use asteroids_field::window_engine::{GlfwWindowEngine, WindowEngine};
use asteroids_field::{AsteroidsField, Simulator};

/// Main entry point for the Asteroids Field demo.
fn main() -> Result<()> {
    env_logger::init();

    info!("🚀 Starting Asteroids Field...");

    show_rust_core_dependencies();

    let field_config = FieldConfig::from_file(FIELD_CONFIG_PATH).unwrap_or_default();
    info!("Field config loaded:\n{:#?}", field_config);
    let renderer_config = RendererConfig::from_file(RENDERER_CONFIG_PATH).unwrap_or_default();
    info!("Renderer config loaded:\n{:#?}", renderer_config);

    // 1. Init Window & Context
    let window_engine = GlfwWindowEngine::init(&renderer_config)?;

    // 2. Init Renderer (now that GL context is ready)
    let renderer = Renderer::new(field_config.max_asteroids, &renderer_config)?;

    // 3. Field + Simulator
    let field = AsteroidsField::new(&field_config, renderer)?;
    let mut simulator = Simulator::new(field, window_engine, renderer_config);

    let result = simulator.run();
    simulator.close();

    result
}
