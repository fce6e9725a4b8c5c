use std::ops::Range;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::leaf::LeafGenerator;
use super::{Growth, SpeciesParameters};
use crate::meshing::algorithms::{close_ring_with_apex, mesh_between_rings, register_ring};
use crate::meshing::{GeometryBuffer, Ring, RingHandle, RingPool, STEM_MATERIAL};
use crate::utils::allometric_scale;

/// Rings alive at the same time while a stem is built.
///
/// A level reads the ring it inherited (or synthesized) and writes its end
/// ring, nothing else: leaves do not take rings from the pool. Once the next
/// level starts, the older of the two is never read again, so two slots are
/// enough whatever the growth.
pub const RING_POOL_CAPACITY: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Tube,
    Cone,
}

/// What one level of the stem produced, in world space.
#[derive(Clone, Debug)]
pub struct StemSegment {
    pub index: usize,
    pub remaining_growth: f32,
    pub kind: SegmentKind,
    pub base_position: Vec3,
    pub orientation: Quat,
    pub length: f32,
    pub base_radius: f32,
    pub start_ring: Ring,
    /// empty for the terminal cone
    pub end_ring: Ring,
    pub apex: Option<u32>,
    /// stem vertices created by this level, leaves excluded
    pub vertices: Range<usize>,
    pub leaves: usize,
}

impl StemSegment {
    pub fn top_position(&self) -> Vec3 {
        self.base_position + self.orientation * (self.length * Vec3::Y)
    }
}

/// Walks the growth down to zero, one stem level per unit of growth.
///
/// Every level is built around +Y from its own base, then rotated and moved
/// into place. The end ring of a tube is reused as the start ring of the
/// next level, so consecutive segments share their seam vertices.
pub struct StemGenerator<'a> {
    species: &'a SpeciesParameters,
    mesh: &'a mut GeometryBuffer,
    rings: &'a mut RingPool<Ring>,
}

impl<'a> StemGenerator<'a> {
    pub fn new(
        species: &'a SpeciesParameters,
        mesh: &'a mut GeometryBuffer,
        rings: &'a mut RingPool<Ring>,
    ) -> Self {
        assert!(
            rings.capacity() >= RING_POOL_CAPACITY,
            "stem generation needs a ring pool of at least {RING_POOL_CAPACITY} slots"
        );
        Self {
            species,
            mesh,
            rings,
        }
    }

    pub fn generate(
        &mut self,
        start_position: Vec3,
        orientation: Quat,
        growth: impl Into<Growth>,
    ) -> Vec<StemSegment> {
        let initial_growth = growth.into().sanitized().0;
        let mut segments = Vec::new();

        let mut position = start_position;
        let mut inherited = None;
        let mut segment_index = 0;
        loop {
            let remaining_growth = initial_growth - segment_index as f32;
            let (segment, end_ring) = self.generate_segment(
                segment_index,
                position,
                orientation,
                remaining_growth,
                inherited,
            );
            let length = segment.length;
            segments.push(segment);

            if remaining_growth <= 1. {
                break;
            }
            position += orientation * (length * Vec3::Y);
            inherited = end_ring;
            segment_index += 1;
        }

        log::debug!(
            "stem of growth {initial_growth}: {} levels, {} vertices",
            segments.len(),
            self.mesh.vertex_count()
        );
        segments
    }

    fn generate_segment(
        &mut self,
        segment_index: usize,
        position: Vec3,
        orientation: Quat,
        remaining_growth: f32,
        inherited: Option<RingHandle>,
    ) -> (StemSegment, Option<RingHandle>) {
        let species = self.species;
        let sides = species.stem_sides as usize;
        let first_vertex = self.mesh.vertex_count();

        let start_scale = allometric_scale(remaining_growth, species.scale_exponent);
        let length = species.segment_length * start_scale;
        let base_radius = species.segment_radius * start_scale;

        self.mesh.set_material(STEM_MATERIAL);

        let start = match inherited {
            Some(handle) => handle,
            None => {
                let handle = self.rings.next();
                register_ring(self.mesh, &mut self.rings[handle], sides, base_radius, 0.);
                handle
            }
        };

        let (kind, end, apex) = if remaining_growth >= 1. {
            let end_scale = allometric_scale(remaining_growth - 1., species.scale_exponent);
            let end = self.rings.next();
            register_ring(
                self.mesh,
                &mut self.rings[end],
                sides,
                species.segment_radius * end_scale,
                length,
            );
            mesh_between_rings(self.mesh, &self.rings[start], &self.rings[end]);
            (SegmentKind::Tube, Some(end), None)
        } else {
            let apex = self.mesh.add_vertex(length * Vec3::Y);
            close_ring_with_apex(self.mesh, &self.rings[start], apex);
            (SegmentKind::Cone, None, Some(apex))
        };

        self.mesh.rotate_vertices(first_vertex.., orientation);
        self.mesh.translate_vertices(first_vertex.., position);
        let vertices = first_vertex..self.mesh.vertex_count();

        let leaves = self.generate_leaves(segment_index, position, orientation, remaining_growth);

        log::trace!(
            "segment {segment_index} ({kind:?}): growth {remaining_growth:.3}, \
             length {length:.3}, {leaves} leaves"
        );

        let segment = StemSegment {
            index: segment_index,
            remaining_growth,
            kind,
            base_position: position,
            orientation,
            length,
            base_radius,
            start_ring: self.rings[start].clone(),
            end_ring: end.map(|e| self.rings[e].clone()).unwrap_or_default(),
            apex,
            vertices,
            leaves,
        };
        (segment, end)
    }

    fn generate_leaves(
        &mut self,
        segment_index: usize,
        position: Vec3,
        orientation: Quat,
        remaining_growth: f32,
    ) -> usize {
        let species = self.species;
        if !species.leaves_emerge(segment_index, remaining_growth) {
            return 0;
        }

        let base_rotation = species.whorl_rotation_degrees(segment_index);
        let spacing = species.leaf_spacing_degrees();
        let leaf_growth = species.leaf_growth(remaining_growth);
        let leaf = LeafGenerator::new(species);

        let n = species.leaves_per_segment as usize;
        for i in 0..n {
            let azimuth = (base_rotation + i as f32 * spacing).to_radians();
            let leaf_orientation = orientation * Quat::from_rotation_y(azimuth);
            leaf.generate(self.mesh, position, leaf_orientation, leaf_growth);
        }
        n
    }
}
