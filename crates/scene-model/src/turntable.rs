//! Turntable rotation animation: two keyframes, linear interpolation.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Keyframe interpolation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Linear,
}

/// A single rotation keyframe on the subject's Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationKeyframe {
    /// Scene frame number.
    pub frame: i64,

    /// Rotation angle around Z in radians.
    pub angle_rad: f64,

    /// Interpolation toward the next keyframe.
    pub interpolation: Interpolation,
}

/// Timing and keyframes for one full turntable revolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TurntableSpec {
    /// Clip duration in seconds.
    pub seconds: f64,

    /// Frames per second.
    pub fps: u32,
}

impl TurntableSpec {
    pub fn new(seconds: f64, fps: u32) -> Self {
        Self { seconds, fps }
    }

    /// First scene frame.
    pub fn frame_start(&self) -> i64 {
        1
    }

    /// Last rendered scene frame. Clips shorter than one frame still
    /// render a single frame.
    pub fn frame_end(&self) -> i64 {
        ((self.seconds * self.fps as f64) as i64).max(1)
    }

    /// Number of frames rendered (seconds x fps).
    pub fn frame_count(&self) -> i64 {
        self.frame_end() - self.frame_start() + 1
    }

    /// Rotation keyframes for a full revolution.
    ///
    /// The closing keyframe sits one frame past the end of the clip so
    /// the last rendered frame stops just short of 360 degrees; frame 1
    /// and a hypothetical frame end+1 would be identical, which keeps the
    /// clip loopable.
    pub fn rotation_keyframes(&self) -> [RotationKeyframe; 2] {
        [
            RotationKeyframe {
                frame: self.frame_start(),
                angle_rad: 0.0,
                interpolation: Interpolation::Linear,
            },
            RotationKeyframe {
                frame: self.frame_end() + 1,
                angle_rad: TAU,
                interpolation: Interpolation::Linear,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_is_seconds_times_fps() {
        let spec = TurntableSpec::new(5.0, 30);
        assert_eq!(spec.frame_start(), 1);
        assert_eq!(spec.frame_end(), 150);
        assert_eq!(spec.frame_count(), 150);
    }

    #[test]
    fn test_fractional_seconds_truncate() {
        let spec = TurntableSpec::new(2.5, 30);
        assert_eq!(spec.frame_count(), 75);

        let spec = TurntableSpec::new(0.01, 30);
        assert_eq!(spec.frame_count(), 1);
    }

    #[test]
    fn test_rotation_keyframes_span_full_turn() {
        let spec = TurntableSpec::new(5.0, 30);
        let [start, end] = spec.rotation_keyframes();

        assert_eq!(start.frame, 1);
        assert_eq!(start.angle_rad, 0.0);
        assert_eq!(end.frame, spec.frame_end() + 1);
        assert!((end.angle_rad - TAU).abs() < 1e-12);
        assert_eq!(start.interpolation, Interpolation::Linear);
        assert_eq!(end.interpolation, Interpolation::Linear);
    }

    #[test]
    fn test_last_frame_stops_short_of_full_turn() {
        // With linear interpolation the angle at the last rendered frame is
        // (count - 1) / count of a revolution, never exactly 2*pi.
        let spec = TurntableSpec::new(1.0, 4);
        let [start, end] = spec.rotation_keyframes();
        let span = (end.frame - start.frame) as f64;
        let at_last = (spec.frame_end() - start.frame) as f64 / span * TAU;
        assert!(at_last < TAU);
        assert!((at_last - 0.75 * TAU).abs() < 1e-12);
    }
}
