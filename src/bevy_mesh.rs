use bevy::asset::RenderAssetUsages;
use bevy::render::mesh::{Indices, Mesh, PrimitiveTopology};
use stem_core::{MeshData, PlantPipelinePhase};

/// One renderable mesh per submesh of a plant, in submesh order: stem and
/// petioles first, then blades. Materials are bound by the host.
pub struct BevyMeshes(pub Vec<Mesh>);

impl PlantPipelinePhase for BevyMeshes {
    type Previous = MeshData;
    type Config = RenderAssetUsages;
    type Builder = ();
    fn generate_from(prev: Self::Previous, usages: &Self::Config, _: &mut Self::Builder) -> Self {
        let meshes = prev
            .submeshes
            .iter()
            .map(|indices| {
                let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, *usages)
                    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, prev.positions.clone())
                    .with_inserted_indices(Indices::U32(indices.clone()));
                mesh.compute_smooth_normals();
                mesh
            })
            .collect();
        BevyMeshes(meshes)
    }
}
