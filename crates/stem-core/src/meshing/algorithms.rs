use glam::Vec3;

use super::mesh_builder::GeometryBuffer;
use super::ring_pool::Ring;

/// Point of the circle of radius `radius` around +Y at height `height`.
pub fn ring_point(angle: f32, radius: f32, height: f32) -> Vec3 {
    Vec3::new(radius * angle.cos(), height, radius * angle.sin())
}

/// Fills `ring` with `sides` new vertices on a regular polygon around +Y.
///
/// The polygon turns clockwise seen from above, which makes the faces of
/// [`mesh_between_rings`] and [`close_ring_with_apex`] point outward.
pub fn register_ring(
    mesh: &mut GeometryBuffer,
    ring: &mut Ring,
    sides: usize,
    radius: f32,
    height: f32,
) {
    let slice_angle = std::f32::consts::TAU / sides as f32;
    ring.clear();
    ring.extend((0..sides).map(|i| {
        mesh.add_vertex(ring_point(-(i as f32) * slice_angle, radius, height))
    }));
}

// `upper` is above `lower`, both rings have the same number of points
pub fn mesh_between_rings(mesh: &mut GeometryBuffer, lower: &[u32], upper: &[u32]) {
    assert_eq!(lower.len(), upper.len());
    let n = lower.len();
    for i in 0..n {
        let j = (i + 1) % n;
        mesh.add_face(&[lower[i], lower[j], upper[j], upper[i]]);
    }
}

pub fn close_ring_with_apex(mesh: &mut GeometryBuffer, ring: &[u32], apex: u32) {
    let n = ring.len();
    for i in 0..n {
        mesh.add_face(&[ring[i], ring[(i + 1) % n], apex]);
    }
}

/// Unnormalized normal of the triangle `(a, b, c)` with counter-clockwise front faces.
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}
