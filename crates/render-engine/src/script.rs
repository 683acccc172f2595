//! Scene-script generation for the host application.
//!
//! The generated Python is purely declarative: every number it contains
//! (camera placement, recenter offset, frame range, keyframes) was computed
//! in Rust beforehand, so the script only has to build the scene and call
//! the renderer. The one runtime decision left to the host is engine
//! selection, which depends on the installed host version.

use std::path::Path;

use spintable_scene::{ScenePlan, TurntableSpec};

/// File-name prefix for rendered frames; the host appends the zero-padded
/// frame number and `.png`.
pub const FRAME_PREFIX: &str = "frame_";

/// Printf-style pattern matching the rendered frame names, as consumed by
/// the encoder.
pub const FRAME_PATTERN: &str = "frame_%04d.png";

/// Everything the scene script needs to render one asset.
#[derive(Debug, Clone)]
pub struct ScriptParams<'a> {
    /// Absolute path to the input asset.
    pub asset_path: &'a Path,

    /// Directory receiving the PNG frame sequence.
    pub frames_dir: &'a Path,

    /// Square render resolution in pixels.
    pub size: u32,

    /// Render sample count.
    pub samples: u32,

    /// Computed camera/light placement.
    pub plan: &'a ScenePlan,

    /// Clip timing and rotation keyframes.
    pub spec: &'a TurntableSpec,
}

/// Generate the Python scene script for one asset.
pub fn scene_script(params: &ScriptParams<'_>) -> String {
    let plan = params.plan;
    let spec = params.spec;
    let [kf_start, kf_end] = spec.rotation_keyframes();
    let frames_prefix = params.frames_dir.join(FRAME_PREFIX);

    let mut script = String::new();

    script.push_str("import bpy\n\n");

    // Fresh empty scene; the host may have user startup files otherwise.
    script.push_str("bpy.ops.wm.read_homefile(use_empty=True)\n");
    script.push_str("scene = bpy.context.scene\n\n");

    // Engine fallback chain depends on the installed host version.
    script.push_str(
        "eng_items = {i.identifier for i in \
         bpy.types.RenderSettings.bl_rna.properties['engine'].enum_items}\n",
    );
    script.push_str(
        "engine = 'BLENDER_EEVEE_NEXT' if 'BLENDER_EEVEE_NEXT' in eng_items \
         else ('BLENDER_EEVEE' if 'BLENDER_EEVEE' in eng_items else 'CYCLES')\n",
    );
    script.push_str("scene.render.engine = engine\n\n");

    script.push_str("scene.render.film_transparent = True\n");
    script.push_str(&format!("scene.render.resolution_x = {}\n", params.size));
    script.push_str(&format!("scene.render.resolution_y = {}\n", params.size));
    script.push_str("scene.render.resolution_percentage = 100\n");
    script.push_str(&format!("scene.frame_start = {}\n", spec.frame_start()));
    script.push_str(&format!("scene.frame_end = {}\n", spec.frame_end()));
    script.push_str("scene.render.image_settings.file_format = \"PNG\"\n");
    script.push_str("scene.render.image_settings.color_mode = \"RGBA\"\n");
    script.push_str("scene.render.image_settings.color_depth = \"8\"\n");
    script.push_str(&format!("scene.render.fps = {}\n\n", spec.fps));

    script.push_str("ee = getattr(scene, 'eevee', None)\n");
    script.push_str("if ee and engine.startswith('BLENDER_EEVEE'):\n");
    script.push_str(&format!(
        "    if hasattr(ee, 'taa_render_samples'): ee.taa_render_samples = {}\n",
        params.samples
    ));
    script.push_str("    if hasattr(ee, 'use_gtao'): ee.use_gtao = True\n");
    script.push_str("cy = getattr(scene, 'cycles', None)\n");
    script.push_str("if cy and engine == 'CYCLES':\n");
    script.push_str(&format!("    cy.samples = {}\n", params.samples));
    script.push_str("    cy.use_adaptive_sampling = True\n");
    script.push_str("    cy.max_bounces = 4\n");
    script.push_str("    cy.use_transparent_background = True\n");
    script.push_str("    cy.device = 'CPU'\n\n");

    script.push_str("for obj in list(bpy.data.objects):\n");
    script.push_str("    bpy.data.objects.remove(obj, do_unlink=True)\n\n");

    script.push_str("cam_data = bpy.data.cameras.new(\"Cam\")\n");
    script.push_str("cam_data.type = \"PERSP\"\n");
    script.push_str(&format!("cam_data.lens = {}\n", py_f64(plan.camera.lens_mm)));
    script.push_str("cam = bpy.data.objects.new(\"Cam\", cam_data)\n");
    script.push_str("scene.collection.objects.link(cam)\n");
    script.push_str("scene.camera = cam\n");
    script.push_str(&format!(
        "cam.location = {}\n",
        py_vec3(plan.camera.location.x, plan.camera.location.y, plan.camera.location.z)
    ));
    script.push_str(&format!(
        "cam.rotation_euler = {}\n\n",
        py_vec3(plan.camera.rotation.x, plan.camera.rotation.y, plan.camera.rotation.z)
    ));

    script.push_str("light_data = bpy.data.lights.new(\"Key\", type=\"AREA\")\n");
    script.push_str(&format!(
        "light_data.energy = {}\n",
        py_f64(plan.light.energy)
    ));
    script.push_str("light = bpy.data.objects.new(\"Key\", light_data)\n");
    script.push_str("scene.collection.objects.link(light)\n");
    script.push_str(&format!(
        "light.location = {}\n",
        py_vec3(plan.light.location.x, plan.light.location.y, plan.light.location.z)
    ));
    script.push_str(&format!(
        "light.rotation_euler = {}\n\n",
        py_vec3(plan.light.rotation.x, plan.light.rotation.y, plan.light.rotation.z)
    ));

    script.push_str("world = bpy.data.worlds.new(\"World\")\n");
    script.push_str("scene.world = world\n");
    script.push_str("world.use_nodes = True\n");
    script.push_str("wn = world.node_tree.nodes\n");
    script.push_str("for n in list(wn): wn.remove(n)\n");
    script.push_str("bg = wn.new(\"ShaderNodeBackground\")\n");
    script.push_str("bg.inputs[1].default_value = 1.0\n");
    script.push_str("bg.inputs[0].default_value = (1, 1, 1, 1)\n");
    script.push_str("out = wn.new(\"ShaderNodeOutputWorld\")\n");
    script.push_str(
        "world.node_tree.links.new(bg.outputs[\"Background\"], out.inputs[\"Surface\"])\n\n",
    );

    script.push_str("before = set(bpy.data.objects)\n");
    script.push_str(&format!(
        "bpy.ops.import_scene.gltf(filepath={})\n",
        py_str(&params.asset_path.display().to_string())
    ));
    script.push_str("after = set(bpy.data.objects)\n");
    script.push_str(
        "imported = [o for o in (after - before) if o.type in \
         {\"MESH\", \"EMPTY\", \"ARMATURE\", \"LIGHT\", \"CAMERA\"}]\n",
    );
    script.push_str("root = bpy.data.objects.new(\"ROOT\", None)\n");
    script.push_str("scene.collection.objects.link(root)\n");
    // Recenter by shifting the imported top-level objects; ROOT stays at the
    // origin so the rotation axis passes through the subject's center.
    script.push_str("for o in imported:\n");
    script.push_str("    if o.parent is None:\n");
    script.push_str("        o.parent = root\n");
    script.push_str(&format!(
        "        o.location = (o.location[0] + {}, o.location[1] + {}, o.location[2] + {})\n\n",
        py_f64(plan.recenter_offset.x),
        py_f64(plan.recenter_offset.y),
        py_f64(plan.recenter_offset.z)
    ));

    for kf in [kf_start, kf_end] {
        script.push_str(&format!("scene.frame_set({})\n", kf.frame));
        script.push_str(&format!(
            "root.rotation_euler = (0.0, 0.0, {})\n",
            py_f64(kf.angle_rad)
        ));
        script.push_str(&format!(
            "root.keyframe_insert(data_path=\"rotation_euler\", frame={})\n",
            kf.frame
        ));
    }
    script.push_str("if root.animation_data and root.animation_data.action:\n");
    script.push_str("    for fc in root.animation_data.action.fcurves:\n");
    script.push_str("        for kp in fc.keyframe_points:\n");
    script.push_str("            kp.interpolation = 'LINEAR'\n\n");

    script.push_str(&format!(
        "scene.render.filepath = {}\n",
        py_str(&frames_prefix.display().to_string())
    ));
    script.push_str("bpy.ops.render.render(animation=True)\n");

    script
}

/// Format a float as a Python literal (always with a decimal point).
fn py_f64(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn py_vec3(x: f64, y: f64, z: f64) -> String {
    format!("({}, {}, {})", py_f64(x), py_f64(y), py_f64(z))
}

/// Quote a string as a Python literal.
fn py_str(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use spintable_scene::{Aabb, CameraFit, ScenePlan, TurntableSpec, Vec3};
    use std::path::PathBuf;

    fn sample_script() -> String {
        let bounds = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let plan = ScenePlan::frame(&bounds, &CameraFit::default());
        let spec = TurntableSpec::new(5.0, 30);
        scene_script(&ScriptParams {
            asset_path: &PathBuf::from("/assets/chair.glb"),
            frames_dir: &PathBuf::from("/out/chair_frames"),
            size: 350,
            samples: 64,
            plan: &plan,
            spec: &spec,
        })
    }

    #[test]
    fn test_script_embeds_resolution_and_timing() {
        let script = sample_script();
        assert!(script.contains("scene.render.resolution_x = 350"));
        assert!(script.contains("scene.render.resolution_y = 350"));
        assert!(script.contains("scene.frame_start = 1"));
        assert!(script.contains("scene.frame_end = 150"));
        assert!(script.contains("scene.render.fps = 30"));
    }

    #[test]
    fn test_script_embeds_camera_placement() {
        let bounds = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let plan = ScenePlan::frame(&bounds, &CameraFit::default());
        let script = sample_script();
        assert!(script.contains(&format!("cam.location = (0.0, {}, 0.0)", py_f64(-plan.distance))));
        assert!(script.contains("cam_data.lens = 50.0"));
    }

    #[test]
    fn test_script_keyframes_full_turn() {
        let script = sample_script();
        assert!(script.contains("keyframe_insert(data_path=\"rotation_euler\", frame=1)"));
        assert!(script.contains("keyframe_insert(data_path=\"rotation_euler\", frame=151)"));
        assert!(script.contains("kp.interpolation = 'LINEAR'"));
    }

    #[test]
    fn test_script_paths_are_quoted() {
        let script = sample_script();
        assert!(script.contains("bpy.ops.import_scene.gltf(filepath=\"/assets/chair.glb\")"));
        assert!(script.contains("scene.render.filepath = \"/out/chair_frames/frame_\""));
    }

    #[test]
    fn test_py_str_escapes() {
        assert_eq!(py_str(r"C:\models"), "\"C:\\\\models\"");
        assert_eq!(py_str("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn test_py_f64_always_has_decimal() {
        assert_eq!(py_f64(3.0), "3.0");
        assert_eq!(py_f64(-2.5), "-2.5");
    }
}
