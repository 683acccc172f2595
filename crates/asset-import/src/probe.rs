//! World-space bounding-box probing for glTF/GLB assets.

use std::path::Path;

use gltf::Gltf;
use spintable_common::error::{SpintableError, SpintableResult};
use spintable_scene::{Aabb, Vec3};

use crate::transform::{aabb_to_z_up, Mat4};

/// Probed information about one asset.
#[derive(Debug, Clone)]
pub struct AssetBounds {
    /// World-space bounding box in host (Z-up) coordinates.
    pub bounds: Aabb,

    /// Number of mesh primitives that contributed extents.
    pub primitive_count: usize,

    /// Number of scene-graph nodes visited.
    pub node_count: usize,
}

/// Probe the world-space bounding box of the asset's default scene.
///
/// Extents come from POSITION accessor min/max metadata transformed by the
/// accumulated node matrices; buffer payloads are never read. A scene with
/// no mesh geometry yields a degenerate box at the origin, which the
/// framing code resolves with its fixed fallback distance.
pub fn probe_bounds(path: &Path) -> SpintableResult<AssetBounds> {
    if !path.exists() {
        return Err(SpintableError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let gltf = Gltf::open(path).map_err(|e| {
        SpintableError::import(format!("Failed to read {}: {e}", path.display()))
    })?;
    let document = &gltf.document;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| {
            SpintableError::import(format!("{} contains no scenes", path.display()))
        })?;

    let mut merged: Option<Aabb> = None;
    let mut primitive_count = 0usize;
    let mut node_count = 0usize;

    for node in scene.nodes() {
        visit_node(
            &node,
            &Mat4::IDENTITY,
            &mut merged,
            &mut primitive_count,
            &mut node_count,
        );
    }

    let gltf_bounds = merged.unwrap_or(Aabb::POINT);
    let bounds = aabb_to_z_up(&gltf_bounds);

    tracing::debug!(
        asset = %path.display(),
        nodes = node_count,
        primitives = primitive_count,
        size = bounds.max_dimension(),
        "Probed asset bounds"
    );

    Ok(AssetBounds {
        bounds,
        primitive_count,
        node_count,
    })
}

fn visit_node(
    node: &gltf::Node,
    parent: &Mat4,
    merged: &mut Option<Aabb>,
    primitive_count: &mut usize,
    node_count: &mut usize,
) {
    *node_count += 1;
    let world = parent.multiply(&Mat4::from_gltf(node.transform().matrix()));

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            let Some(accessor) = primitive.get(&gltf::Semantic::Positions) else {
                continue;
            };
            let (Some(min), Some(max)) = (
                parse_extent(accessor.min()),
                parse_extent(accessor.max()),
            ) else {
                continue;
            };

            // Transform all eight corners; axis-aligned boxes do not stay
            // axis-aligned under rotation.
            let local = Aabb::new(min, max);
            for corner in local.corners() {
                let p = world.transform_point(&corner);
                *merged = Some(match merged {
                    Some(bounds) => bounds.expand(&p),
                    None => Aabb::new(p, p),
                });
            }
            *primitive_count += 1;
        }
    }

    for child in node.children() {
        visit_node(&child, &world, merged, primitive_count, node_count);
    }
}

/// Parse an accessor min/max JSON value as a 3-component vector.
fn parse_extent(value: Option<serde_json::Value>) -> Option<Vec3> {
    let value = value?;
    let items = value.as_array()?;
    if items.len() < 3 {
        return None;
    }
    Some(Vec3::new(
        items[0].as_f64()?,
        items[1].as_f64()?,
        items[2].as_f64()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_extent() {
        let v = parse_extent(Some(json!([-1.0, 0.5, 2]))).unwrap();
        assert_eq!(v, Vec3::new(-1.0, 0.5, 2.0));
    }

    #[test]
    fn test_parse_extent_rejects_malformed() {
        assert!(parse_extent(None).is_none());
        assert!(parse_extent(Some(json!([1.0, 2.0]))).is_none());
        assert!(parse_extent(Some(json!("not an array"))).is_none());
        assert!(parse_extent(Some(json!([1.0, "x", 3.0]))).is_none());
    }

    #[test]
    fn test_probe_missing_file_is_not_found() {
        let err = probe_bounds(Path::new("/nonexistent/asset.glb")).unwrap_err();
        assert!(matches!(err, SpintableError::FileNotFound { .. }));
    }
}
