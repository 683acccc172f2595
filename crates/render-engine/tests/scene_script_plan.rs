//! End-to-end checks on the planned scene for a known bounding box:
//! the script handed to the host must reflect exactly the framing and
//! timing the scene model computed.

use std::path::PathBuf;

use spintable_render::script::{scene_script, ScriptParams, FRAME_PATTERN, FRAME_PREFIX};
use spintable_scene::{Aabb, CameraFit, ScenePlan, TurntableSpec, Vec3};

fn plan_for(min: Vec3, max: Vec3) -> ScenePlan {
    ScenePlan::frame(&Aabb::new(min, max), &CameraFit::default())
}

#[test]
fn script_for_offset_subject_recenters_it() {
    let plan = plan_for(Vec3::new(4.0, 4.0, 4.0), Vec3::new(6.0, 6.0, 6.0));
    let spec = TurntableSpec::new(2.0, 24);
    let script = scene_script(&ScriptParams {
        asset_path: &PathBuf::from("/models/crate.glb"),
        frames_dir: &PathBuf::from("/tmp/crate_frames"),
        size: 256,
        samples: 64,
        plan: &plan,
        spec: &spec,
    });

    // Subject center (5,5,5) must be shifted back to the origin.
    assert!(script.contains("o.location[0] + -5.0"));
    assert!(script.contains("o.location[1] + -5.0"));
    assert!(script.contains("o.location[2] + -5.0"));

    // 2s @ 24fps: frames 1..48, closing keyframe at 49.
    assert!(script.contains("scene.frame_start = 1"));
    assert!(script.contains("scene.frame_end = 48"));
    assert!(script.contains("frame=49"));
}

#[test]
fn script_for_empty_scene_uses_fallback_distance() {
    let plan = plan_for(Vec3::ZERO, Vec3::ZERO);
    let spec = TurntableSpec::new(5.0, 30);
    let script = scene_script(&ScriptParams {
        asset_path: &PathBuf::from("/models/empty.glb"),
        frames_dir: &PathBuf::from("/tmp/empty_frames"),
        size: 350,
        samples: 64,
        plan: &plan,
        spec: &spec,
    });

    assert!(script.contains("cam.location = (0.0, -3.0, 0.0)"));
    // Light still tracks the fallback distance (3.0 * 0.8 is not an exact
    // double, so only the prefix is checked).
    assert!(script.contains("light.location = (1.5, -1.5, 2.4"));
}

#[test]
fn frame_prefix_matches_encoder_pattern() {
    // Host writes frame_0001.png and up; the encoder consumes frame_%04d.png.
    assert!(FRAME_PATTERN.starts_with(FRAME_PREFIX));
    assert!(FRAME_PATTERN.ends_with("%04d.png"));
}

#[test]
fn rendered_frame_angles_stay_below_full_turn() {
    let spec = TurntableSpec::new(5.0, 30);
    let [start, end] = spec.rotation_keyframes();
    let span = (end.frame - start.frame) as f64;

    for frame in start.frame..=spec.frame_end() {
        let angle = (frame - start.frame) as f64 / span * end.angle_rad;
        assert!(angle < std::f64::consts::TAU);
    }
}
