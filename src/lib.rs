//! Procedural plant stems with phyllotactic leaves.
//!
//! The geometry lives in [`stem_core`]; this crate re-exports it and, with
//! the `bevy` feature, turns finished meshes into renderable assets.

pub use stem_core::*;

#[cfg(feature = "bevy")]
mod bevy_mesh;
#[cfg(feature = "bevy")]
pub use bevy_mesh::BevyMeshes;
