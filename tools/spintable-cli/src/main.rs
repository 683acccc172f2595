//! Spintable CLI — turntable preview videos for 3D asset files.
//!
//! Usage:
//!   spintable render [OPTIONS]   Render turntables for every asset in a directory
//!   spintable info <ASSET>       Show probed bounds and camera framing
//!   spintable check              Check external tool availability

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "spintable",
    about = "Batch 360-degree turntable previews for 3D assets",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render turntable videos for every model asset in a directory
    Render {
        /// Directory containing input .glb files
        #[arg(long)]
        in_dir: PathBuf,

        /// Directory receiving the encoded videos
        #[arg(long)]
        out_dir: PathBuf,

        /// Clip duration in seconds
        #[arg(long, default_value = "5.0")]
        seconds: f64,

        /// Frame rate
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Square output resolution in pixels
        #[arg(long, default_value = "350")]
        size: u32,
    },

    /// Show the probed bounding box and camera framing for one asset
    Info {
        /// Path to the asset file
        asset: PathBuf,
    },

    /// Check that the host application and encoder are available
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging settings come from the config file; --verbose overrides the level.
    let mut logging = spintable_common::config::AppConfig::load().logging;
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    spintable_common::logging::init_logging(&logging)?;

    match cli.command {
        Commands::Render {
            in_dir,
            out_dir,
            seconds,
            fps,
            size,
        } => commands::render::run(in_dir, out_dir, seconds, fps, size).await,
        Commands::Info { asset } => commands::info::run(asset),
        Commands::Check => commands::check::run(),
    }
}
