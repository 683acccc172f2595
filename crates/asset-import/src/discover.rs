//! Model-asset discovery in an input directory.

use std::path::{Path, PathBuf};

use spintable_common::error::{SpintableError, SpintableResult};

/// File extension recognized as a model asset.
const ASSET_EXTENSION: &str = "glb";

/// List all model assets directly inside `dir`, sorted by file name so
/// batch runs process files in a deterministic order.
pub fn discover_assets(dir: &Path) -> SpintableResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SpintableError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut assets: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_asset_extension(path))
        .collect();

    assets.sort_by_key(|path| path.file_name().map(|n| n.to_os_string()));

    tracing::debug!(dir = %dir.display(), count = assets.len(), "Discovered assets");
    Ok(assets)
}

fn has_asset_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ASSET_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "spintable-discover-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = scratch_dir("filter");
        for name in ["b.glb", "a.GLB", "notes.txt", "c.gltf"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }

        let assets = discover_assets(&dir).unwrap();
        let names: Vec<_> = assets
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.GLB", "b.glb"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_discover_empty_dir_is_ok() {
        let dir = scratch_dir("empty");
        assert!(discover_assets(&dir).unwrap().is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_discover_missing_dir_errors() {
        let err = discover_assets(Path::new("/nonexistent/assets")).unwrap_err();
        assert!(matches!(err, SpintableError::FileNotFound { .. }));
    }
}
