#![cfg(feature = "bevy")]

use bevy::asset::RenderAssetUsages;
use bevy::render::mesh::Mesh;
use stem_mesh::{BevyMeshes, Grow, Growth, MeshData, Plant, PlantGenerator, SpeciesParameters};

#[test]
fn one_bevy_mesh_per_submesh() {
    let species = SpeciesParameters::default();
    let mut generator = PlantGenerator::new();
    let data = Growth(3.5)
        .grow::<Plant>(&species, &mut generator)
        .grow::<MeshData>(&(), &mut ());
    let expected: Vec<usize> = data.submeshes.iter().map(Vec::len).collect();

    let BevyMeshes(meshes) = data.grow::<BevyMeshes>(&RenderAssetUsages::default(), &mut ());
    assert_eq!(meshes.len(), 2);
    for (mesh, n) in meshes.iter().zip(expected) {
        assert_eq!(mesh.indices().map(|i| i.len()), Some(n));
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
    }
}
