//! Octahedron geometry
//!
//! A six-vertex octahedron: one apex above the XZ plane, four vertices on
//! the plane (one per axis direction), one apex below. The eight triangular
//! faces are indexed, 24 indices total, so the shared vertices carry
//! pre-baked normals instead of per-face ones.

use crate::pipeline::Vertex;

/// Number of vertices in the octahedron
pub const VERTEX_COUNT: usize = 6;

/// Number of indices (8 triangles * 3)
pub const INDEX_COUNT: usize = 24;

/// The fixed octahedron mesh data
#[derive(Clone)]
pub struct Octahedron {
    /// The 6 vertices: top apex, four equatorial, bottom apex
    vertices: [Vertex; VERTEX_COUNT],
    /// Triangle list; faces wind clockwise seen from outside, so the
    /// pipeline must not cull back faces
    indices: [u32; INDEX_COUNT],
}

impl Octahedron {
    /// Create the octahedron centered on the Y axis
    ///
    /// The top apex sits at y = 1.5 and the bottom at y = -1.0, so the
    /// shape is slightly stretched upward. Equatorial vertices are at unit
    /// distance on the X and Z axes.
    pub fn new() -> Self {
        let vertices = [
            // position            normal             tex_coord
            Vertex::new([0.0, 1.5, 0.0], [0.0, 1.0, 0.0], [0.5, 1.0]), // top
            Vertex::new([1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0]), // +x
            Vertex::new([0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0]), // +z
            Vertex::new([-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0]), // -x
            Vertex::new([0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [1.0, 1.0]), // -z
            Vertex::new([0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.5, 0.0]), // bottom
        ];

        // Four upper faces fan around the top apex, four lower faces
        // around the bottom apex with reversed winding.
        let indices = [
            0, 1, 2, // top +x +z
            0, 2, 3, // top +z -x
            0, 3, 4, // top -x -z
            0, 4, 1, // top -z +x
            5, 2, 1, // bottom +z +x
            5, 3, 2, // bottom -x +z
            5, 4, 3, // bottom -z -x
            5, 1, 4, // bottom +x -z
        ];

        Self { vertices, indices }
    }

    /// Get the vertex data
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Get the index data
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Default for Octahedron {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octahedron_vertex_count() {
        let o = Octahedron::new();
        assert_eq!(o.vertex_count(), 6);
    }

    #[test]
    fn test_octahedron_index_count() {
        let o = Octahedron::new();
        assert_eq!(o.index_count(), 24);
        assert_eq!(o.triangle_count(), 8);
    }

    #[test]
    fn test_indices_in_range() {
        let o = Octahedron::new();
        for &idx in o.indices() {
            assert!((idx as usize) < o.vertex_count(), "Index {} out of range", idx);
        }
    }

    #[test]
    fn test_every_vertex_is_referenced() {
        let o = Octahedron::new();
        let mut seen = [false; VERTEX_COUNT];
        for &idx in o.indices() {
            seen[idx as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "Unreferenced vertex in {:?}", seen);
    }

    #[test]
    fn test_triangles_are_non_degenerate() {
        // Each triangle must reference three distinct vertices
        let o = Octahedron::new();
        for tri in o.indices().chunks(3) {
            assert_ne!(tri[0], tri[1]);
            assert_ne!(tri[1], tri[2]);
            assert_ne!(tri[0], tri[2]);
        }
    }

    #[test]
    fn test_every_face_touches_an_apex() {
        // The upper four triangles fan from vertex 0, the lower four from
        // vertex 5.
        let o = Octahedron::new();
        for (i, tri) in o.indices().chunks(3).enumerate() {
            let apex = if i < 4 { 0 } else { 5 };
            assert_eq!(tri[0], apex);
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let o = Octahedron::new();
        for v in o.vertices() {
            let [x, y, z] = v.normal;
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < 1e-6, "Normal {:?} not unit length", v.normal);
        }
    }

    #[test]
    fn test_apex_positions() {
        let o = Octahedron::new();
        assert_eq!(o.vertices()[0].position, [0.0, 1.5, 0.0]);
        assert_eq!(o.vertices()[5].position, [0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_equatorial_vertices_on_plane() {
        let o = Octahedron::new();
        for v in &o.vertices()[1..5] {
            assert_eq!(v.position[1], 0.0);
        }
    }

    #[test]
    fn test_tex_coords_in_unit_square() {
        let o = Octahedron::new();
        for v in o.vertices() {
            assert!(v.tex_coord[0] >= 0.0 && v.tex_coord[0] <= 1.0);
            assert!(v.tex_coord[1] >= 0.0 && v.tex_coord[1] <= 1.0);
        }
    }
}
