//! Per-asset turntable jobs and the batch driver.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use spintable_asset::{discover_assets, probe_bounds};
use spintable_common::error::{SpintableError, SpintableResult};
use spintable_scene::{CameraFit, ScenePlan, TurntableSpec};

use crate::encode::{encode_sequence, encoder_available, EncodeProfile};
use crate::host::SceneHost;
use crate::script::{scene_script, ScriptParams};

/// A single asset ready to be rendered.
#[derive(Debug, Clone)]
pub struct TurntableJob {
    /// Input model file.
    pub asset_path: PathBuf,

    /// Directory receiving the two encoded videos.
    pub out_dir: PathBuf,

    /// Clip timing.
    pub spec: TurntableSpec,

    /// Square output resolution in pixels.
    pub size: u32,

    /// Render sample count.
    pub samples: u32,

    /// Camera fitting parameters.
    pub fit: CameraFit,
}

impl TurntableJob {
    /// Asset file stem used to name outputs.
    pub fn stem(&self) -> SpintableResult<String> {
        self.asset_path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                SpintableError::import(format!(
                    "Asset path has no usable file name: {}",
                    self.asset_path.display()
                ))
            })
    }

    /// Transient directory holding the PNG frame sequence.
    pub fn frames_dir(&self) -> SpintableResult<PathBuf> {
        Ok(self.out_dir.join(format!("{}_frames", self.stem()?)))
    }

    /// Final video path for the given profile.
    pub fn output_path(&self, profile: EncodeProfile) -> SpintableResult<PathBuf> {
        Ok(self
            .out_dir
            .join(format!("{}.{}", self.stem()?, profile.extension())))
    }
}

/// Stages of one turntable job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Probing,
    Rendering,
    Encoding,
    Cleanup,
    Complete,
    Failed,
}

/// Progress report for one turntable job.
#[derive(Debug, Clone, Copy)]
pub struct RenderProgress {
    /// Current stage.
    pub stage: RenderStage,

    /// Frames rendered so far.
    pub frames_rendered: u64,

    /// Total frames to render.
    pub total_frames: u64,
}

/// Batch-level progress callback: asset stem plus job progress.
pub type ProgressCallback = Box<dyn Fn(&str, RenderProgress) + Send + Sync>;

/// Outputs produced for one asset.
#[derive(Debug, Clone, Serialize)]
pub struct AssetRecord {
    /// Input file name.
    pub asset: String,

    /// Encoded WebM path.
    pub webm: PathBuf,

    /// Encoded MOV path.
    pub mov: PathBuf,

    /// Frames rendered.
    pub frames: u64,

    /// Wall time spent on this asset.
    pub elapsed_secs: f64,
}

/// Machine-readable record of a batch run, written as `manifest.json` in
/// the output directory.
#[derive(Debug, Clone, Serialize)]
pub struct BatchManifest {
    pub version: String,
    pub started_at: String,
    pub finished_at: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub assets: Vec<AssetRecord>,
}

/// Render one asset: probe, plan, render frames, encode both profiles,
/// best-effort cleanup of the frame directory.
pub async fn render_turntable(
    host: &dyn SceneHost,
    job: &TurntableJob,
    progress: Option<&(dyn Fn(RenderProgress) + Send + Sync)>,
) -> SpintableResult<AssetRecord> {
    let started = Instant::now();
    let stem = job.stem()?;
    let total_frames = job.spec.frame_count() as u64;

    if !job.asset_path.exists() {
        return Err(SpintableError::FileNotFound {
            path: job.asset_path.clone(),
        });
    }
    if !host.is_available() {
        return Err(SpintableError::unsupported(format!(
            "Host application not found (expected {} on PATH)",
            host.name()
        )));
    }
    if !encoder_available() {
        return Err(SpintableError::unsupported(
            "No encoder found (expected ffmpeg on PATH)",
        ));
    }

    std::fs::create_dir_all(&job.out_dir)?;

    let report = |stage: RenderStage, frames_rendered: u64| {
        if let Some(cb) = progress {
            cb(RenderProgress {
                stage,
                frames_rendered,
                total_frames,
            });
        }
    };

    report(RenderStage::Probing, 0);
    let probed = probe_bounds(&job.asset_path)?;
    let plan = ScenePlan::frame(&probed.bounds, &job.fit);
    tracing::info!(
        asset = %job.asset_path.display(),
        size = plan.subject_size,
        distance = plan.distance,
        primitives = probed.primitive_count,
        "Framed subject"
    );

    let frames_dir = job.frames_dir()?;
    std::fs::create_dir_all(&frames_dir)?;

    let script = scene_script(&ScriptParams {
        asset_path: &job.asset_path,
        frames_dir: &frames_dir,
        size: job.size,
        samples: job.samples,
        plan: &plan,
        spec: &job.spec,
    });
    let script_path = frames_dir.join("turntable_scene.py");
    std::fs::write(&script_path, script)?;

    report(RenderStage::Rendering, 0);
    let on_frame = |done: u64| report(RenderStage::Rendering, done);
    host.render_frames(&script_path, Some(&on_frame))?;

    report(RenderStage::Encoding, total_frames);
    let webm = job.output_path(EncodeProfile::WebmVp9)?;
    encode_sequence(
        &frames_dir,
        &webm,
        EncodeProfile::WebmVp9,
        job.spec.fps,
        job.size,
    )?;
    let mov = job.output_path(EncodeProfile::MovProres)?;
    encode_sequence(
        &frames_dir,
        &mov,
        EncodeProfile::MovProres,
        job.spec.fps,
        job.size,
    )?;

    // Cleanup is best effort: a lingering frame directory is not worth
    // failing the asset over.
    report(RenderStage::Cleanup, total_frames);
    if let Err(e) = std::fs::remove_dir_all(&frames_dir) {
        tracing::warn!(
            dir = %frames_dir.display(),
            error = %e,
            "Failed to remove frame directory"
        );
    }

    report(RenderStage::Complete, total_frames);
    tracing::info!(
        asset = %stem,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Turntable rendered"
    );

    Ok(AssetRecord {
        asset: job
            .asset_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or(stem),
        webm,
        mov,
        frames: total_frames,
        elapsed_secs: started.elapsed().as_secs_f64(),
    })
}

/// Render every asset in `in_dir` and write a run manifest to `out_dir`.
///
/// Any render or encode failure aborts the batch; the manifest is only
/// written for completed runs.
pub async fn render_batch(
    host: &dyn SceneHost,
    in_dir: &Path,
    out_dir: &Path,
    spec: TurntableSpec,
    size: u32,
    samples: u32,
    fit: CameraFit,
    progress: Option<ProgressCallback>,
) -> SpintableResult<BatchManifest> {
    let started_at = chrono::Utc::now().to_rfc3339();
    let assets = discover_assets(in_dir)?;

    tracing::info!(
        input = %in_dir.display(),
        output = %out_dir.display(),
        assets = assets.len(),
        frames_per_asset = spec.frame_count(),
        "Starting batch"
    );

    if assets.is_empty() {
        tracing::warn!(dir = %in_dir.display(), "No model assets found");
    }

    std::fs::create_dir_all(out_dir)?;

    let mut records = Vec::with_capacity(assets.len());
    for asset_path in assets {
        let job = TurntableJob {
            asset_path,
            out_dir: out_dir.to_path_buf(),
            spec,
            size,
            samples,
            fit,
        };
        let stem = job.stem()?;

        let record = match &progress {
            Some(cb) => {
                let per_asset = |p: RenderProgress| cb(&stem, p);
                render_turntable(host, &job, Some(&per_asset)).await?
            }
            None => render_turntable(host, &job, None).await?,
        };
        records.push(record);
    }

    let manifest = BatchManifest {
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at,
        finished_at: chrono::Utc::now().to_rfc3339(),
        input_dir: in_dir.to_path_buf(),
        output_dir: out_dir.to_path_buf(),
        assets: records,
    };

    let manifest_path = out_dir.join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    tracing::info!(manifest = %manifest_path.display(), "Wrote run manifest");

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> TurntableJob {
        TurntableJob {
            asset_path: PathBuf::from("/assets/Old Chair.glb"),
            out_dir: PathBuf::from("/out"),
            spec: TurntableSpec::new(5.0, 30),
            size: 350,
            samples: 64,
            fit: CameraFit::default(),
        }
    }

    #[test]
    fn test_output_naming_follows_stem() {
        let job = sample_job();
        assert_eq!(job.stem().unwrap(), "Old Chair");
        assert_eq!(
            job.frames_dir().unwrap(),
            PathBuf::from("/out/Old Chair_frames")
        );
        assert_eq!(
            job.output_path(EncodeProfile::WebmVp9).unwrap(),
            PathBuf::from("/out/Old Chair.webm")
        );
        assert_eq!(
            job.output_path(EncodeProfile::MovProres).unwrap(),
            PathBuf::from("/out/Old Chair.mov")
        );
    }

    #[test]
    fn test_job_carries_frame_count() {
        let job = sample_job();
        assert_eq!(job.spec.frame_count(), 150);
    }
}
