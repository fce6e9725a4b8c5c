pub mod algorithms;
pub mod mesh_builder;
pub mod ring_pool;

pub use mesh_builder::{GeometryBuffer, MeshData, BLADE_MATERIAL, STEM_MATERIAL, SUBMESH_COUNT};
pub use ring_pool::{Ring, RingHandle, RingPool};
