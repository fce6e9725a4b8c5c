use std::ops::Range;

use glam::{Quat, Vec3};

use super::SpeciesParameters;
use crate::meshing::{GeometryBuffer, BLADE_MATERIAL, STEM_MATERIAL};
use crate::utils::allometric_scale;

pub const PETIOLE_VERTEX_COUNT: usize = 4;
pub const PETIOLE_TRIANGLE_COUNT: usize = 3;
pub const BLADE_VERTEX_COUNT: usize = 8;
pub const BLADE_TRIANGLE_COUNT: usize = 4;
pub const LEAF_VERTEX_COUNT: usize = PETIOLE_VERTEX_COUNT + BLADE_VERTEX_COUNT;

/// Builds one leaf: a triangular stalk (petiole) ending in a folded,
/// two-sided blade.
///
/// In its own frame the petiole starts at the origin and points along +Z,
/// with +Y as the upper side of the blade.
pub struct LeafGenerator<'a> {
    species: &'a SpeciesParameters,
}

impl<'a> LeafGenerator<'a> {
    pub fn new(species: &'a SpeciesParameters) -> Self {
        Self { species }
    }

    /// Emits the leaf and returns the range of vertices it uses.
    ///
    /// `orientation` maps the leaf frame to the world before the leaf is
    /// tilted by the species' vertical angle.
    pub fn generate(
        &self,
        mesh: &mut GeometryBuffer,
        position: Vec3,
        orientation: Quat,
        leaf_growth: f32,
    ) -> Range<usize> {
        let species = self.species;
        let first_vertex = mesh.vertex_count();
        let leaf_orientation =
            orientation * Quat::from_rotation_x(-species.leaf_vertical_angle.to_radians());
        let leaf_scale = allometric_scale(leaf_growth, species.scale_exponent);

        self.add_petiole(mesh);

        let blade_start = mesh.vertex_count();
        self.add_blade(mesh);
        mesh.translate_vertices(
            blade_start..,
            Vec3::Z * species.petiole_length * species.blade_position,
        );

        mesh.place_vertices(first_vertex.., leaf_scale, leaf_orientation, position);

        log::trace!(
            "leaf at {position:?}, growth {leaf_growth:.3}, scale {leaf_scale:.3}"
        );
        first_vertex..mesh.vertex_count()
    }

    fn add_petiole(&self, mesh: &mut GeometryBuffer) {
        let s = self.species;
        let half_width = 0.5 * s.petiole_width;

        let left = mesh.add_vertex(Vec3::new(-half_width, 0., 0.));
        let right = mesh.add_vertex(Vec3::new(half_width, 0., 0.));
        let bottom = mesh.add_vertex(Vec3::new(0., -s.petiole_depth, 0.));
        let tip = mesh.add_vertex(Vec3::new(0., 0., s.petiole_length));

        mesh.set_material(STEM_MATERIAL);
        mesh.add_face(&[left, tip, right]);
        mesh.add_face(&[right, tip, bottom]);
        mesh.add_face(&[bottom, tip, left]);
    }

    fn add_blade(&self, mesh: &mut GeometryBuffer) {
        let s = self.species;
        let fold = s.blade_fold_angle.to_radians();
        let half_width = 0.5 * s.blade_width;
        let (x, y) = (fold.cos() * half_width, fold.sin() * half_width);
        let middle = 0.5 * s.blade_length;

        let base = Vec3::ZERO;
        let tip = Vec3::new(0., 0., s.blade_length);
        let right = Vec3::new(x, y, middle);
        let left = Vec3::new(-x, y, middle);

        mesh.set_material(BLADE_MATERIAL);

        let [b, t, r, l] = [base, tip, right, left].map(|p| mesh.add_vertex(p));
        mesh.add_face(&[b, t, r]);
        mesh.add_face(&[b, l, t]);

        // the back side gets its own vertices so that normals are not shared
        let [b, t, r, l] = [base, tip, right, left].map(|p| mesh.add_vertex(p));
        mesh.add_face(&[b, r, t]);
        mesh.add_face(&[b, t, l]);
    }
}
