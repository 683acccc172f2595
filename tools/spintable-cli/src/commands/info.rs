//! Show probed bounds and camera framing for one asset.

use std::path::PathBuf;

use spintable_asset::probe_bounds;
use spintable_scene::{CameraFit, ScenePlan};

pub fn run(asset: PathBuf) -> anyhow::Result<()> {
    let probed =
        probe_bounds(&asset).map_err(|e| anyhow::anyhow!("Failed to probe asset: {e}"))?;
    let plan = ScenePlan::frame(&probed.bounds, &CameraFit::default());

    println!("Asset: {}", asset.display());
    println!(
        "  Nodes: {}, mesh primitives: {}",
        probed.node_count, probed.primitive_count
    );
    println!(
        "  Bounds min: ({:.4}, {:.4}, {:.4})",
        probed.bounds.min.x, probed.bounds.min.y, probed.bounds.min.z
    );
    println!(
        "  Bounds max: ({:.4}, {:.4}, {:.4})",
        probed.bounds.max.x, probed.bounds.max.y, probed.bounds.max.z
    );
    println!("  Largest dimension: {:.4}", plan.subject_size);
    println!("  Camera distance:   {:.4}", plan.distance);
    println!(
        "  Camera location:   ({:.4}, {:.4}, {:.4})",
        plan.camera.location.x, plan.camera.location.y, plan.camera.location.z
    );
    println!(
        "  Light location:    ({:.4}, {:.4}, {:.4})",
        plan.light.location.x, plan.light.location.y, plan.light.location.z
    );

    if probed.bounds.is_degenerate() {
        println!("  Note: no mesh extents found; using the fixed fallback distance.");
    }

    Ok(())
}
