use log::info;

/// Version d'une dépendance, injectée à la compilation par `build.rs`.
fn crate_version(injected: Option<&'static str>) -> &'static str {
    injected.filter(|v| !v.is_empty()).unwrap_or("Unknown")
}

/// Affiche les informations Rust et les dépendances principales de la compilation.
pub fn show_rust_core_dependencies() {
    info!(
        "Rust compiler version: {}",
        rustc_version_runtime::version()
    );
    info!("  Platform    : {}", std::env::consts::OS);
    info!("  Arch        : {}", std::env::consts::ARCH);

    info!("Rust core dependancies");
    info!("  GL   version: {}", crate_version(option_env!("GL_CRATE_VERSION")));
    info!("  GLFW version: {}", crate_version(option_env!("GLFW_CRATE_VERSION")));
    info!("  GLAM version: {}", crate_version(option_env!("GLAM_CRATE_VERSION")));
}
