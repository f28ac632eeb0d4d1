//! Triangle mesh storage.
//!
//! This module provides [`TriMesh`], the flat face-vertex representation
//! used by the gravity model: an ordered vertex array and an ordered array
//! of vertex index triples. A vertex's identity is its position in the
//! array; faces are consistently wound so that `e1 × e2` points outward.
//!
//! # Edge Slots
//!
//! Each face has three directed edges, numbered by [`EdgeSlot`] under the
//! face's own (a, b, c) vertex labeling:
//!
//! - slot 1: a → b
//! - slot 2: b → c
//! - slot 3: c → a
//!
//! Two directed edges from different faces are *twins* iff one is the
//! exact reverse of the other. Twin resolution lives in
//! [`adjacency`](crate::mesh::adjacency).

use nalgebra::{Point3, Vector3};

use crate::error::{GravityError, Result};

/// One of the three directed edges of a triangular face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeSlot {
    /// Edge a → b.
    E1,
    /// Edge b → c.
    E2,
    /// Edge c → a.
    E3,
}

impl EdgeSlot {
    /// All three slots, in precedence order.
    pub const ALL: [EdgeSlot; 3] = [EdgeSlot::E1, EdgeSlot::E2, EdgeSlot::E3];

    /// Zero-based index of this slot (0, 1, 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            EdgeSlot::E1 => 0,
            EdgeSlot::E2 => 1,
            EdgeSlot::E3 => 2,
        }
    }

    /// Slot for a zero-based index.
    ///
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => EdgeSlot::E1,
            1 => EdgeSlot::E2,
            2 => EdgeSlot::E3,
            _ => panic!("edge slot index {} out of range", index),
        }
    }
}

/// A triangle mesh stored as flat vertex and face arrays.
///
/// This is the topology cache for a body: it holds the raw geometry and
/// offers read access plus an atomic [`replace`](TriMesh::replace)
/// operation. Derived quantities (normals, dyads, adjacency) are computed
/// by [`MeshGeometry`](crate::mesh::MeshGeometry) and recomputed in full
/// whenever the mesh changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TriMesh {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[usize; 3]>,
}

impl TriMesh {
    /// Create a mesh from vertex positions and zero-based triangle indices.
    ///
    /// # Errors
    /// Returns [`GravityError::EmptyMesh`], [`GravityError::InvalidVertexIndex`],
    /// or [`GravityError::DegenerateFace`] if the arrays are structurally
    /// invalid. Closedness and manifoldness are checked later, during
    /// adjacency resolution.
    ///
    /// # Example
    /// ```
    /// use regolith::mesh::TriMesh;
    /// use nalgebra::Point3;
    ///
    /// let vertices = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.5, 1.0, 0.0),
    ///     Point3::new(0.5, 0.5, 1.0),
    /// ];
    /// let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
    ///
    /// let mesh = TriMesh::new(vertices, faces).unwrap();
    /// assert_eq!(mesh.num_vertices(), 4);
    /// assert_eq!(mesh.num_faces(), 4);
    /// ```
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<[usize; 3]>) -> Result<Self> {
        validate(&vertices, &faces)?;
        Ok(Self { vertices, faces })
    }

    /// Replace the mesh geometry wholesale.
    ///
    /// Validation runs before anything is touched: on error the mesh is
    /// left exactly as it was.
    pub fn replace(&mut self, vertices: Vec<Point3<f64>>, faces: Vec<[usize; 3]>) -> Result<()> {
        validate(&vertices, &faces)?;
        self.vertices = vertices;
        self.faces = faces;
        Ok(())
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of undirected edges of a closed genus-0 triangulation,
    /// `3 (V - 2)` by Euler's formula.
    #[inline]
    pub fn num_edges(&self) -> usize {
        3 * (self.num_vertices() - 2)
    }

    /// The vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// The face index triples.
    #[inline]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, v: usize) -> &Point3<f64> {
        &self.vertices[v]
    }

    /// The three vertex positions of a face, in winding order.
    #[inline]
    pub fn face_positions(&self, f: usize) -> [Point3<f64>; 3] {
        let [a, b, c] = self.faces[f];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// The directed edge (origin, destination) of a face's edge slot.
    #[inline]
    pub fn directed_edge(&self, f: usize, slot: EdgeSlot) -> (usize, usize) {
        let [a, b, c] = self.faces[f];
        match slot {
            EdgeSlot::E1 => (a, b),
            EdgeSlot::E2 => (b, c),
            EdgeSlot::E3 => (c, a),
        }
    }

    /// The edge vector (destination minus origin) of a face's edge slot.
    #[inline]
    pub fn edge_vector(&self, f: usize, slot: EdgeSlot) -> Vector3<f64> {
        let (o, d) = self.directed_edge(f, slot);
        self.vertices[d] - self.vertices[o]
    }

    /// Centroid of a face.
    pub fn face_centroid(&self, f: usize) -> Point3<f64> {
        let [p0, p1, p2] = self.face_positions(f);
        Point3::from((p0.coords + p1.coords + p2.coords) / 3.0)
    }

    /// For every vertex, the list of faces incident to it.
    pub fn vertex_face_map(&self) -> Vec<Vec<usize>> {
        let mut map = vec![Vec::new(); self.num_vertices()];
        for (f, face) in self.faces.iter().enumerate() {
            for &v in face {
                map[v].push(f);
            }
        }
        map
    }
}

fn validate(vertices: &[Point3<f64>], faces: &[[usize; 3]]) -> Result<()> {
    if faces.is_empty() {
        return Err(GravityError::EmptyMesh);
    }
    for (fi, face) in faces.iter().enumerate() {
        for &vi in face {
            if vi >= vertices.len() {
                return Err(GravityError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
            return Err(GravityError::DegenerateFace { face: fi });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        (vertices, faces)
    }

    #[test]
    fn test_construction() {
        let (vertices, faces) = tetrahedron();
        let mesh = TriMesh::new(vertices, faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_edges(), 6);
    }

    #[test]
    fn test_empty_mesh() {
        let result = TriMesh::new(vec![Point3::origin()], vec![]);
        assert!(matches!(result, Err(GravityError::EmptyMesh)));
    }

    #[test]
    fn test_invalid_vertex_index() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        let result = TriMesh::new(vertices, vec![[0, 1, 2]]);
        assert!(matches!(
            result,
            Err(GravityError::InvalidVertexIndex { face: 0, vertex: 1 })
        ));
    }

    #[test]
    fn test_degenerate_face() {
        let (vertices, _) = tetrahedron();
        let result = TriMesh::new(vertices, vec![[0, 0, 2]]);
        assert!(matches!(result, Err(GravityError::DegenerateFace { face: 0 })));
    }

    #[test]
    fn test_directed_edges() {
        let (vertices, faces) = tetrahedron();
        let mesh = TriMesh::new(vertices, faces).unwrap();

        // Face 1 is [0, 1, 3]
        assert_eq!(mesh.directed_edge(1, EdgeSlot::E1), (0, 1));
        assert_eq!(mesh.directed_edge(1, EdgeSlot::E2), (1, 3));
        assert_eq!(mesh.directed_edge(1, EdgeSlot::E3), (3, 0));

        let e1 = mesh.edge_vector(1, EdgeSlot::E1);
        assert!((e1 - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn test_replace_atomic() {
        let (vertices, faces) = tetrahedron();
        let mut mesh = TriMesh::new(vertices.clone(), faces.clone()).unwrap();

        // An invalid replacement must leave the mesh untouched.
        let result = mesh.replace(vertices.clone(), vec![[0, 1, 9]]);
        assert!(result.is_err());
        assert_eq!(mesh.faces(), faces.as_slice());

        // A valid replacement swaps both arrays.
        let shifted: Vec<_> = vertices
            .iter()
            .map(|p| p + Vector3::new(1.0, 0.0, 0.0))
            .collect();
        mesh.replace(shifted.clone(), faces.clone()).unwrap();
        assert_eq!(mesh.vertices(), shifted.as_slice());
    }

    #[test]
    fn test_vertex_face_map() {
        let (vertices, faces) = tetrahedron();
        let mesh = TriMesh::new(vertices, faces).unwrap();

        let map = mesh.vertex_face_map();
        assert_eq!(map.len(), 4);
        // Every tetrahedron vertex touches exactly 3 faces.
        for incident in &map {
            assert_eq!(incident.len(), 3);
        }
        assert_eq!(map[0], vec![0, 1, 3]);
    }

    #[test]
    fn test_edge_slot_round_trip() {
        for slot in EdgeSlot::ALL {
            assert_eq!(EdgeSlot::from_index(slot.index()), slot);
        }
    }
}
