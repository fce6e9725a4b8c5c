use std::ops::{Bound, RangeBounds};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

pub const STEM_MATERIAL: usize = 0;
pub const BLADE_MATERIAL: usize = 1;
pub const SUBMESH_COUNT: usize = 2;

pub const MIN_FACE_POINTS: usize = 3;
pub const MAX_FACE_POINTS: usize = 8;

/// Incremental mesh assembly: a vertex list shared by every submesh and one
/// triangle list per material.
///
/// Vertex indices are insertion order and are never reused. Transforms work
/// on index ranges so that a sub-part can be built in its own frame and
/// moved into place afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeometryBuffer {
    points: Vec<Vec3>,
    submeshes: Vec<Vec<u32>>,
    active: usize,
}

/// Finished mesh handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub submeshes: Vec<Vec<u32>>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self, submesh: usize) -> usize {
        self.submeshes.get(submesh).map_or(0, |s| s.len() / 3)
    }

    /// Every index list is made of whole triangles pointing at existing vertices.
    pub fn is_valid(&self) -> bool {
        let n = self.positions.len() as u32;
        self.submeshes
            .iter()
            .all(|s| s.len() % 3 == 0 && s.iter().all(|&i| i < n))
    }
}

impl Default for GeometryBuffer {
    fn default() -> Self {
        Self::new(SUBMESH_COUNT)
    }
}

impl GeometryBuffer {
    pub fn new(submesh_count: usize) -> Self {
        Self {
            points: Vec::new(),
            submeshes: vec![Vec::new(); submesh_count.max(1)],
            active: 0,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    pub fn active_material(&self) -> usize {
        self.active
    }

    /// Triangles in `submesh`, zero for an unknown submesh.
    pub fn triangle_count(&self, submesh: usize) -> usize {
        self.submeshes.get(submesh).map_or(0, |s| s.len() / 3)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.points
    }

    pub fn point(&self, i: u32) -> Vec3 {
        self.points[i as usize]
    }

    pub fn indices(&self, submesh: usize) -> &[u32] {
        self.submeshes.get(submesh).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add_vertex(&mut self, p: Vec3) -> u32 {
        let id = self.points.len() as u32;
        self.points.push(p);
        id
    }

    pub fn add_vertices(&mut self, points: impl IntoIterator<Item = Vec3>) -> std::ops::Range<u32> {
        let start = self.points.len() as u32;
        self.points.extend(points);
        start..self.points.len() as u32
    }

    /// Out of range ids are ignored, the current submesh stays selected.
    pub fn set_material(&mut self, id: usize) {
        if id < self.submeshes.len() {
            self.active = id;
        }
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.submeshes[self.active].extend([a, b, c]);
    }

    /// Fan triangulation of a convex polygon: `(v0, v1, v2), (v0, v2, v3), ...`
    pub fn add_face(&mut self, polygon: &[u32]) {
        debug_assert!(
            (MIN_FACE_POINTS..=MAX_FACE_POINTS).contains(&polygon.len()),
            "faces have between {MIN_FACE_POINTS} and {MAX_FACE_POINTS} points, got {}",
            polygon.len()
        );
        let Some((&v0, rest)) = polygon.split_first() else {
            return;
        };
        for pair in rest.windows(2) {
            self.add_triangle(v0, pair[0], pair[1]);
        }
    }

    fn points_mut(&mut self, range: impl RangeBounds<usize>) -> &mut [Vec3] {
        let bounds: (Bound<usize>, Bound<usize>) =
            (range.start_bound().cloned(), range.end_bound().cloned());
        &mut self.points[bounds]
    }

    /// Scale around `center`, or around the origin when it is `None`.
    pub fn scale_vertices(
        &mut self,
        range: impl RangeBounds<usize>,
        factor: f32,
        center: Option<Vec3>,
    ) {
        let center = center.unwrap_or(Vec3::ZERO);
        for p in self.points_mut(range) {
            *p = (*p - center) * factor + center;
        }
    }

    pub fn rotate_vertices(&mut self, range: impl RangeBounds<usize>, rotation: Quat) {
        for p in self.points_mut(range) {
            *p = rotation * *p;
        }
    }

    pub fn translate_vertices(&mut self, range: impl RangeBounds<usize>, offset: Vec3) {
        for p in self.points_mut(range) {
            *p += offset;
        }
    }

    /// Scale, then rotate, then translate: local to world placement.
    pub fn place_vertices(
        &mut self,
        range: impl RangeBounds<usize> + Clone,
        scale: f32,
        rotation: Quat,
        translation: Vec3,
    ) {
        self.scale_vertices(range.clone(), scale, None);
        self.rotate_vertices(range.clone(), rotation);
        self.translate_vertices(range, translation);
    }

    /// Empties every list, keeps the number of submeshes.
    pub fn clear(&mut self) {
        self.points.clear();
        self.submeshes.iter_mut().for_each(Vec::clear);
        self.active = 0;
    }

    pub fn finalize(&self) -> MeshData {
        let mesh = MeshData {
            positions: self.points.iter().map(|p| p.to_array()).collect(),
            submeshes: self.submeshes.clone(),
        };
        debug_assert!(mesh.is_valid(), "triangle index past the end of the vertex list");
        mesh
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn square(buffer: &mut GeometryBuffer) -> Vec<u32> {
        [
            Vec3::new(0., 0., 0.),
            Vec3::new(1., 0., 0.),
            Vec3::new(1., 1., 0.),
            Vec3::new(0., 1., 0.),
        ]
        .into_iter()
        .map(|p| buffer.add_vertex(p))
        .collect()
    }

    #[test]
    fn vertex_indices_follow_insertion_order() {
        let mut buffer = GeometryBuffer::default();
        assert_eq!(buffer.add_vertex(Vec3::X), 0);
        assert_eq!(buffer.add_vertex(Vec3::Y), 1);
        assert_eq!(buffer.add_vertices([Vec3::Z, Vec3::ONE]), 2..4);
        assert_eq!(buffer.vertex_count(), 4);
    }

    #[test]
    fn faces_are_fan_triangulated() {
        let mut buffer = GeometryBuffer::default();
        let ids: Vec<u32> = (0..8).map(|i| buffer.add_vertex(Vec3::splat(i as f32))).collect();

        buffer.add_face(&ids[..3]);
        assert_eq!(buffer.indices(STEM_MATERIAL), &[0, 1, 2]);

        buffer.clear();
        let ids: Vec<u32> = (0..8).map(|i| buffer.add_vertex(Vec3::splat(i as f32))).collect();
        buffer.add_face(&ids[..5]);
        assert_eq!(buffer.indices(STEM_MATERIAL), &[0, 1, 2, 0, 2, 3, 0, 3, 4]);

        buffer.add_face(&ids);
        assert_eq!(buffer.triangle_count(STEM_MATERIAL), 3 + 6);
    }

    #[test]
    fn material_selects_submesh() {
        let mut buffer = GeometryBuffer::default();
        let ids = square(&mut buffer);
        buffer.add_face(&ids);
        buffer.set_material(BLADE_MATERIAL);
        buffer.add_face(&ids[..3]);
        assert_eq!(buffer.triangle_count(STEM_MATERIAL), 2);
        assert_eq!(buffer.triangle_count(BLADE_MATERIAL), 1);

        buffer.set_material(7);
        assert_eq!(buffer.active_material(), BLADE_MATERIAL);
        buffer.add_triangle(0, 1, 2);
        assert_eq!(buffer.triangle_count(BLADE_MATERIAL), 2);
    }

    #[test]
    fn transforms_only_touch_their_range() {
        let mut buffer = GeometryBuffer::default();
        square(&mut buffer);
        buffer.translate_vertices(2..4, Vec3::Z);
        assert_eq!(buffer.point(1), Vec3::new(1., 0., 0.));
        assert_eq!(buffer.point(2), Vec3::new(1., 1., 1.));

        buffer.scale_vertices(..2, 3., Some(Vec3::X));
        assert_eq!(buffer.point(0), Vec3::new(-2., 0., 0.));
        assert_eq!(buffer.point(1), Vec3::new(1., 0., 0.));

        buffer.rotate_vertices(1..=1, Quat::from_rotation_y(FRAC_PI_2));
        let p = buffer.point(1);
        assert_relative_eq!(p.x, 0., epsilon = 1e-6);
        assert_relative_eq!(p.z, -1., epsilon = 1e-6);
    }

    #[test]
    fn placement_order_is_scale_rotate_translate() {
        let mut buffer = GeometryBuffer::default();
        buffer.add_vertex(Vec3::Z);
        buffer.place_vertices(.., 2., Quat::from_rotation_x(-FRAC_PI_2), Vec3::new(5., 0., 0.));
        let p = buffer.point(0);
        assert_relative_eq!(p.x, 5., epsilon = 1e-6);
        assert_relative_eq!(p.y, 2., epsilon = 1e-6);
        assert_relative_eq!(p.z, 0., epsilon = 1e-6);
    }

    #[test]
    fn clear_keeps_submesh_count() {
        let mut buffer = GeometryBuffer::new(3);
        let ids = square(&mut buffer);
        buffer.set_material(2);
        buffer.add_face(&ids);
        buffer.clear();
        assert_eq!(buffer.vertex_count(), 0);
        assert_eq!(buffer.submesh_count(), 3);
        assert_eq!(buffer.active_material(), STEM_MATERIAL);
        assert!((0..3).all(|s| buffer.triangle_count(s) == 0));
    }

    #[test]
    fn finalize_copies_everything() {
        let mut buffer = GeometryBuffer::default();
        let ids = square(&mut buffer);
        buffer.add_face(&ids);
        let mesh = buffer.finalize();
        assert!(mesh.is_valid());
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.positions[2], [1., 1., 0.]);
        assert_eq!(mesh.triangle_count(STEM_MATERIAL), 2);
        assert_eq!(mesh.triangle_count(BLADE_MATERIAL), 0);
    }

    #[test]
    fn dangling_index_is_invalid() {
        let mesh = MeshData {
            positions: vec![[0.; 3]; 2],
            submeshes: vec![vec![0, 1, 2]],
        };
        assert!(!mesh.is_valid());
    }
}
