//! Field-of-view camera fitting.
//!
//! Places a camera so the subject fills the frame with a safety margin:
//! the distance follows from the lens angle and the subject's largest
//! bounding-box dimension, plus a small offset so the silhouette never
//! touches the frame edge.

use serde::{Deserialize, Serialize};

use crate::bounds::{Aabb, Vec3};

/// Fixed camera distance used when the subject has zero size
/// (degenerate bounding box, e.g. an empty scene).
pub const FALLBACK_DISTANCE: f64 = 3.0;

/// Fraction of the subject size added to the fit distance as breathing room.
const DISTANCE_OFFSET_RATIO: f64 = 0.1;

/// Camera fitting parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraFit {
    /// Safety margin applied to the subject size (1.0 = exact fit).
    pub margin: f64,

    /// Focal length in millimeters.
    pub lens_mm: f64,

    /// Sensor width in millimeters.
    pub sensor_mm: f64,
}

impl Default for CameraFit {
    fn default() -> Self {
        Self {
            margin: 1.15,
            lens_mm: 50.0,
            sensor_mm: 36.0,
        }
    }
}

impl CameraFit {
    /// Create a fit with a custom margin and the default 50mm lens.
    pub fn with_margin(margin: f64) -> Self {
        Self {
            margin,
            ..Self::default()
        }
    }

    /// Horizontal field of view in radians.
    pub fn fov(&self) -> f64 {
        2.0 * (self.sensor_mm / (2.0 * self.lens_mm)).atan()
    }

    /// Camera distance that frames a subject of the given size.
    ///
    /// Zero (or negative) size falls back to [`FALLBACK_DISTANCE`].
    pub fn fit_distance(&self, size: f64) -> f64 {
        if size <= 0.0 {
            return FALLBACK_DISTANCE;
        }
        (size * self.margin) / (2.0 * (self.fov() / 2.0).tan()) + size * DISTANCE_OFFSET_RATIO
    }
}

/// Camera placement in host-application world space (Z-up).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraRig {
    /// World-space location.
    pub location: Vec3,

    /// Euler rotation in radians (XYZ order).
    pub rotation: Vec3,

    /// Focal length in millimeters.
    pub lens_mm: f64,
}

/// Key light placement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LightRig {
    /// World-space location.
    pub location: Vec3,

    /// Euler rotation in radians (XYZ order).
    pub rotation: Vec3,

    /// Light power in watts.
    pub energy: f64,
}

/// A fully computed scene placement for one subject.
///
/// The subject is recentered at the origin and the camera looks at it
/// along -Y from a fit distance; rotating the subject around Z then yields
/// a turntable in front of a fixed camera.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScenePlan {
    /// Translation applied to the subject root so its bounding-box center
    /// lands on the origin.
    pub recenter_offset: Vec3,

    /// Largest bounding-box dimension of the subject.
    pub subject_size: f64,

    /// Camera distance from the origin.
    pub distance: f64,

    /// Camera placement.
    pub camera: CameraRig,

    /// Key light placement.
    pub light: LightRig,
}

impl ScenePlan {
    /// Frame a subject with the given bounding box.
    pub fn frame(bounds: &Aabb, fit: &CameraFit) -> ScenePlan {
        let size = bounds.max_dimension().max(0.0);
        let dist = fit.fit_distance(size);

        ScenePlan {
            recenter_offset: bounds.center().negate(),
            subject_size: size,
            distance: dist,
            camera: CameraRig {
                location: Vec3::new(0.0, -dist, 0.0),
                rotation: Vec3::new(90f64.to_radians(), 0.0, 0.0),
                lens_mm: fit.lens_mm,
            },
            light: LightRig {
                location: Vec3::new(dist * 0.5, -dist * 0.5, dist * 0.8),
                rotation: Vec3::new(60f64.to_radians(), 0.0, 30f64.to_radians()),
                energy: 2000.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_size_falls_back_to_fixed_distance() {
        let fit = CameraFit::default();
        assert_eq!(fit.fit_distance(0.0), FALLBACK_DISTANCE);
        assert_eq!(fit.fit_distance(-1.0), FALLBACK_DISTANCE);
    }

    #[test]
    fn test_fit_distance_formula() {
        let fit = CameraFit::default();
        let size = 2.0;
        let expected = (size * fit.margin) / (2.0 * (fit.fov() / 2.0).tan()) + size * 0.1;
        assert!((fit.fit_distance(size) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_fov_of_default_lens() {
        // 50mm lens on a 36mm sensor: ~39.6 degrees.
        let fov_deg = CameraFit::default().fov().to_degrees();
        assert!((fov_deg - 39.6).abs() < 0.1);
    }

    #[test]
    fn test_frame_recenters_subject() {
        let bounds = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(3.0, 4.0, 5.0));
        let plan = ScenePlan::frame(&bounds, &CameraFit::default());
        assert_eq!(plan.recenter_offset, Vec3::new(-2.0, -3.0, -4.0));
        assert!((plan.subject_size - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_camera_looks_down_negative_y() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let plan = ScenePlan::frame(&bounds, &CameraFit::default());
        assert_eq!(plan.camera.location.x, 0.0);
        assert!(plan.camera.location.y < 0.0);
        assert_eq!(plan.camera.location.z, 0.0);
        assert!((plan.camera.rotation.x - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_frame_degenerate_box_uses_fallback() {
        let plan = ScenePlan::frame(&Aabb::POINT, &CameraFit::default());
        assert_eq!(plan.distance, FALLBACK_DISTANCE);
        assert_eq!(plan.camera.location, Vec3::new(0.0, -FALLBACK_DISTANCE, 0.0));
    }

    #[test]
    fn test_light_tracks_camera_distance() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(4.0, 4.0, 4.0));
        let plan = ScenePlan::frame(&bounds, &CameraFit::default());
        let d = plan.distance;
        assert_eq!(plan.light.location, Vec3::new(d * 0.5, -d * 0.5, d * 0.8));
    }

    proptest! {
        #[test]
        fn prop_distance_scales_linearly_with_size(size in 0.001f64..1000.0, k in 1.0f64..100.0) {
            let fit = CameraFit::default();
            let base = fit.fit_distance(size);
            let scaled = fit.fit_distance(size * k);
            // The whole formula is linear in size, so scaling the subject
            // scales the distance by the same factor.
            prop_assert!((scaled - base * k).abs() < 1e-6 * scaled.max(1.0));
        }

        #[test]
        fn prop_wider_margin_moves_camera_back(size in 0.001f64..1000.0) {
            let tight = CameraFit::with_margin(1.0);
            let loose = CameraFit::with_margin(1.3);
            prop_assert!(loose.fit_distance(size) > tight.fit_distance(size));
        }
    }
}
