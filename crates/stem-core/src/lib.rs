pub mod growing;
pub mod meshing;
pub mod utils;

use glam::{Quat, Vec3};

pub use growing::generation::{SegmentKind, StemGenerator, StemSegment, RING_POOL_CAPACITY};
pub use growing::leaf::LeafGenerator;
pub use growing::{Growth, SpeciesError, SpeciesParameters};
pub use meshing::{
    GeometryBuffer, MeshData, Ring, RingHandle, RingPool, BLADE_MATERIAL, STEM_MATERIAL,
    SUBMESH_COUNT,
};

pub trait PlantPipelinePhase {
    type Previous;
    type Config;
    type Builder;
    fn generate_from(
        prev: Self::Previous,
        config: &Self::Config,
        builder: &mut Self::Builder,
    ) -> Self;
}

pub trait Grow {
    fn grow<Next>(self, config: &Next::Config, builder: &mut Next::Builder) -> Next
    where
        Next: PlantPipelinePhase<Previous = Self>;
}

impl<T> Grow for T {
    fn grow<Next>(self, config: &Next::Config, builder: &mut Next::Builder) -> Next
    where
        Next: PlantPipelinePhase<Previous = T>,
    {
        Next::generate_from(self, config, builder)
    }
}

/// Geometry of one plant and the stem levels it was built from.
#[derive(Clone, Debug, Default)]
pub struct Plant {
    pub mesh: GeometryBuffer,
    pub segments: Vec<StemSegment>,
}

/// Owns the buffers of a generation pass so that regenerating a plant
/// (after an edit of its species or growth) reuses their allocations.
#[derive(Debug)]
pub struct PlantGenerator {
    plant: Plant,
    rings: RingPool<Ring>,
}

impl Default for PlantGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantGenerator {
    pub fn new() -> Self {
        Self {
            plant: Plant::default(),
            rings: RingPool::new(RING_POOL_CAPACITY),
        }
    }

    /// Clears the previous plant and grows a new one from the origin, stem
    /// pointing up. `species` is clamped on a private copy.
    pub fn generate(&mut self, species: &SpeciesParameters, growth: impl Into<Growth>) -> &Plant {
        let species = species.clamped();
        let growth = growth.into().sanitized();

        self.plant.mesh.clear();
        self.rings.reset();
        self.plant.segments = StemGenerator::new(&species, &mut self.plant.mesh, &mut self.rings)
            .generate(Vec3::ZERO, Quat::IDENTITY, growth);

        log::debug!(
            "plant of growth {}: {} vertices, {} stem triangles, {} blade triangles",
            growth.0,
            self.plant.mesh.vertex_count(),
            self.plant.mesh.triangle_count(STEM_MATERIAL),
            self.plant.mesh.triangle_count(BLADE_MATERIAL),
        );
        &self.plant
    }

    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    pub fn into_plant(self) -> Plant {
        self.plant
    }

    /// Hands the last plant over, leaving an empty one behind.
    pub fn take_plant(&mut self) -> Plant {
        std::mem::take(&mut self.plant)
    }
}

/// One-shot generation: `(species, growth) -> geometry`.
pub fn generate_plant(species: &SpeciesParameters, growth: impl Into<Growth>) -> GeometryBuffer {
    let mut generator = PlantGenerator::new();
    generator.generate(species, growth);
    generator.into_plant().mesh
}

/// Moves the plant out of the generator instead of copying it: the
/// generator is left empty and its next pass allocates anew.
impl PlantPipelinePhase for Plant {
    type Previous = Growth;
    type Config = SpeciesParameters;
    type Builder = PlantGenerator;
    fn generate_from(
        prev: Self::Previous,
        config: &Self::Config,
        builder: &mut Self::Builder,
    ) -> Self {
        builder.generate(config, prev);
        builder.take_plant()
    }
}

impl PlantPipelinePhase for MeshData {
    type Previous = Plant;
    type Config = ();
    type Builder = ();
    fn generate_from(prev: Self::Previous, _: &Self::Config, _: &mut Self::Builder) -> Self {
        prev.mesh.finalize()
    }
}
