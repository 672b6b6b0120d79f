//! Check pointer backend availability.

use std::path::Path;

use touchless_common::config::{config_file_path, AppConfig};
use touchless_pointer_output::backends::detect_best_backend;

pub fn run(config: &AppConfig, explicit_path: Option<&Path>) -> anyhow::Result<()> {
    println!("Touchless System Check");
    println!("{}", "=".repeat(50));

    if cfg!(feature = "enigo") {
        println!("[OK] Built with OS pointer support (enigo)");
    } else {
        println!("[WARN] Built without OS pointer support; rebuild with --features enigo");
    }

    let backend = detect_best_backend(None);
    match backend.screen_size() {
        Ok(screen) => println!(
            "[OK] Pointer backend: {} ({}x{})",
            backend.name(),
            screen.width,
            screen.height
        ),
        Err(e) => println!("[FAIL] Pointer backend {}: {e}", backend.name()),
    }

    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);
    println!("{}", config_status(&path));

    match config.validate() {
        Ok(()) => println!(
            "[OK] Camera {}x{}, active zone margin {}px",
            config.camera.width, config.camera.height, config.pointer.frame_margin
        ),
        Err(e) => println!("[FAIL] {e}"),
    }

    Ok(())
}

/// Report line for the config file the effective configuration came from.
fn config_status(path: &Path) -> String {
    if path.exists() {
        format!("[OK] Config: {}", path.display())
    } else {
        format!("[INFO] Config: defaults ({} not found)", path.display())
    }
}
