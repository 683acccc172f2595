//! Spintable Asset Import
//!
//! Reads just enough of a glTF/GLB file to frame a camera around it:
//! the world-space bounding box of the default scene. Mesh extents come
//! from accessor min/max metadata, so buffer payloads are never loaded.
//!
//! Also handles discovery of model files in an input directory.

pub mod discover;
pub mod probe;
pub mod transform;

pub use discover::*;
pub use probe::*;
