//! Spintable Render Engine
//!
//! Orchestrates the external tools that turn one model asset into two
//! turntable preview videos.
//!
//! # Pipeline Architecture
//!
//! ```text
//! asset.glb ──┬── Probe bounds (accessor extents)
//!             │          │
//!             │          ├── Camera fit + scene plan
//!             │          │
//!             └── Scene script (generated Python)
//!                        │
//!                        ▼
//!            blender --background  ──►  frame_0001.png .. frame_NNNN.png
//!                                               │
//!                                 ┌─────────────┴─────────────┐
//!                                 ▼                           ▼
//!                        ffmpeg (VP9 + alpha)      ffmpeg (ProRes 4444)
//!                                 │                           │
//!                                 ▼                           ▼
//!                            asset.webm                  asset.mov
//! ```
//!
//! The frame directory is transient and removed (best effort) after both
//! encodes finish.

pub mod encode;
pub mod host;
pub mod job;
pub mod script;

pub use host::{BlenderHost, SceneHost};
pub use job::*;
