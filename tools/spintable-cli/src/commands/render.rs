//! Batch-render turntables for a directory of assets.

use std::io::Write;
use std::path::PathBuf;

use spintable_common::config::AppConfig;
use spintable_render::{render_batch, BlenderHost, ProgressCallback, RenderStage};
use spintable_scene::{CameraFit, TurntableSpec};

pub async fn run(
    in_dir: PathBuf,
    out_dir: PathBuf,
    seconds: f64,
    fps: u32,
    size: u32,
) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let host = BlenderHost::new(&config.render.blender_binary);
    let spec = TurntableSpec::new(seconds, fps);
    let fit = CameraFit::with_margin(config.render.margin);

    println!("Rendering turntables");
    println!("  Input:      {}", in_dir.display());
    println!("  Output:     {}", out_dir.display());
    println!("  Clip:       {seconds}s @ {fps}fps ({} frames)", spec.frame_count());
    println!("  Resolution: {size}x{size}");

    let progress: ProgressCallback = Box::new(|asset, p| match p.stage {
        RenderStage::Probing => {
            print!("\r  {asset}: probing bounds...                    ");
            let _ = std::io::stdout().flush();
        }
        RenderStage::Rendering => {
            print!(
                "\r  {asset}: rendering frame {}/{}     ",
                p.frames_rendered, p.total_frames
            );
            let _ = std::io::stdout().flush();
        }
        RenderStage::Encoding => {
            print!("\r  {asset}: encoding...                          ");
            let _ = std::io::stdout().flush();
        }
        RenderStage::Complete => {
            println!("\r  {asset}: done                                ");
        }
        _ => {}
    });

    let manifest = render_batch(
        &host,
        &in_dir,
        &out_dir,
        spec,
        size,
        config.render.samples,
        fit,
        Some(progress),
    )
    .await?;

    if manifest.assets.is_empty() {
        println!("No .glb assets found in {}", in_dir.display());
    } else {
        println!(
            "Rendered {} asset(s) into {}",
            manifest.assets.len(),
            out_dir.display()
        );
    }

    Ok(())
}
