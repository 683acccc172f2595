//! Headless invocation of the host 3D application.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use spintable_common::error::{SpintableError, SpintableResult};

/// Environment variable overriding the host binary path.
pub const HOST_BINARY_ENV: &str = "SPINTABLE_BLENDER";

/// Callback invoked once per rendered frame with the running frame count.
pub type FrameCallback<'a> = &'a (dyn Fn(u64) + Send + Sync);

/// Seam over the external 3D application that imports the asset and
/// renders the frame sequence.
pub trait SceneHost: Send {
    /// Run the given scene script to completion.
    fn render_frames(
        &self,
        script_path: &Path,
        on_frame: Option<FrameCallback<'_>>,
    ) -> SpintableResult<()>;

    /// Check if this host is available on the system.
    fn is_available(&self) -> bool;

    /// Host name.
    fn name(&self) -> &str;
}

/// Blender in background mode.
pub struct BlenderHost {
    binary: String,
}

impl BlenderHost {
    /// Resolve the host binary: env override first, then the configured
    /// binary (usually `blender` on PATH).
    pub fn new(configured_binary: &str) -> Self {
        let binary = std::env::var(HOST_BINARY_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| configured_binary.to_string());
        Self { binary }
    }

    /// The resolved binary path or name.
    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl SceneHost for BlenderHost {
    fn render_frames(
        &self,
        script_path: &Path,
        on_frame: Option<FrameCallback<'_>>,
    ) -> SpintableResult<()> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["--background", "--factory-startup", "--python"])
            .arg(script_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(binary = %self.binary, script = %script_path.display(), "Running host");
        let mut child = cmd
            .spawn()
            .map_err(|e| SpintableError::render(format!("Failed to start {}: {e}", self.binary)))?;

        tracing::info!(pid = child.id(), "Host process started");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SpintableError::render("Failed to capture host stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| SpintableError::render("Failed to capture host stderr"))?;

        // Drain stderr concurrently to avoid the host blocking on a full pipe.
        let stderr_task = std::thread::spawn(move || -> String {
            let mut reader = BufReader::new(stderr);
            let mut output = String::new();
            match reader.read_to_string(&mut output) {
                Ok(_) => output,
                Err(err) => format!("<failed to read host stderr: {err}>"),
            }
        });

        // Read raw bytes and convert lossily: the host may emit non-UTF-8
        // (file names, driver warnings) and that must not abort the render.
        let mut reader = BufReader::new(stdout);
        let mut buf: Vec<u8> = Vec::new();
        let mut frames_done: u64 = 0;
        loop {
            buf.clear();
            let bytes = match reader.read_until(b'\n', &mut buf) {
                Ok(n) => n,
                Err(e) => {
                    // The renderer must not keep running detached after a
                    // pipe failure.
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stderr_task.join();
                    return Err(SpintableError::render(format!(
                        "Failed reading host output: {e}"
                    )));
                }
            };
            if bytes == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            // The host prints one "Saved:" line per written frame.
            if trimmed.starts_with("Saved:") {
                frames_done += 1;
                if let Some(cb) = on_frame {
                    cb(frames_done);
                }
            }
            tracing::trace!(target: "spintable::host", "{trimmed}");
        }

        let status = child
            .wait()
            .map_err(|e| SpintableError::render(format!("Failed to wait on host: {e}")))?;

        let stderr_output = stderr_task
            .join()
            .unwrap_or_else(|_| "<failed to join stderr reader>".to_string());

        if !status.success() {
            return Err(SpintableError::render(format!(
                "Host render failed (status {}): {}",
                status,
                stderr_output.trim()
            )));
        }

        tracing::info!(frames = frames_done, "Host render finished");
        Ok(())
    }

    fn is_available(&self) -> bool {
        command_exists(&self.binary)
    }

    fn name(&self) -> &str {
        "blender"
    }
}

/// Check whether a binary resolves on PATH (or as a direct path).
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists_for_shell_builtins() {
        assert!(command_exists("sh"));
        assert!(!command_exists("definitely-not-a-real-binary-xyz"));
    }

    #[test]
    fn test_non_utf8_host_output_does_not_abort_render() {
        use std::os::unix::fs::PermissionsExt;
        use std::sync::atomic::{AtomicU64, Ordering};

        let dir = std::env::temp_dir().join(format!("spintable-host-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let script = dir.join("fake-host.sh");
        std::fs::write(
            &script,
            "#!/bin/sh\nprintf '\\377\\376\\377\\n'\nprintf 'Saved: frame_0001.png\\n'\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let host = BlenderHost {
            binary: script.display().to_string(),
        };
        let frames = AtomicU64::new(0);
        let on_frame = |n: u64| frames.store(n, Ordering::SeqCst);
        host.render_frames(Path::new("unused.py"), Some(&on_frame))
            .unwrap();
        assert_eq!(frames.load(Ordering::SeqCst), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_host_binary_defaults_to_configured() {
        // Only valid while the env override is unset in the test environment.
        if std::env::var(HOST_BINARY_ENV).is_err() {
            let host = BlenderHost::new("blender-4.2");
            assert_eq!(host.binary(), "blender-4.2");
        }
    }
}
