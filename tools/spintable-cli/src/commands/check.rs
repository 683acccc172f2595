//! Check external tool availability.

use spintable_common::config::AppConfig;
use spintable_render::encode::encoder_available;
use spintable_render::{BlenderHost, SceneHost};

pub fn run() -> anyhow::Result<()> {
    println!("Spintable System Check");
    println!("{}", "=".repeat(50));

    let config = AppConfig::load();
    let host = BlenderHost::new(&config.render.blender_binary);

    if host.is_available() {
        println!("[OK] Host application: {} ({})", host.name(), host.binary());
    } else {
        println!(
            "[MISSING] Host application: {} not found (looked for `{}`)",
            host.name(),
            host.binary()
        );
    }

    if encoder_available() {
        println!("[OK] Encoder: ffmpeg");
    } else {
        println!("[MISSING] Encoder: ffmpeg not found on PATH");
    }

    println!();
    if host.is_available() && encoder_available() {
        println!("All required tools are available. Spintable is ready.");
    } else {
        println!("Some required tools are missing. Install them and re-run.");
    }

    Ok(())
}
