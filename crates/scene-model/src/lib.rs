//! Spintable Scene Model
//!
//! Pure geometry and scene-planning types shared by the asset prober and
//! the render engine:
//! - Bounding-box math (`Vec3`, `Aabb`)
//! - Field-of-view camera fitting and rig placement
//! - Turntable rotation keyframes
//!
//! This crate performs no I/O and spawns no processes; everything here is
//! deterministic and unit-testable.

pub mod bounds;
pub mod framing;
pub mod turntable;

pub use bounds::*;
pub use framing::*;
pub use turntable::*;
