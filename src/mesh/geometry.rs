//! Precomputed face and edge geometry.
//!
//! The polyhedral gravity summation weights every face by its normal dyad
//! and every edge by an edge dyad combining the two adjacent faces. This
//! module derives all of those quantities once per mesh snapshot:
//!
//! - per face: unit outward normal, normal dyad `n nᵀ`, centroid, and one
//!   in-plane outward unit normal per edge slot;
//! - per (face, slot): the edge dyad
//!   `n_f ⊗ n̂_f,s + n_adj ⊗ n̂_adj,s'`, where (adj, s') is the twin
//!   resolved by [`EdgeAdjacency`].
//!
//! The build runs in three stages: a parallel per-face pass for normals
//! and edge normals, the adjacency resolution, and a parallel per-face
//! pass for the edge dyads. Each stage completes before the next starts,
//! which is the only synchronization the data dependencies require.
//!
//! There is no incremental update: any change to the mesh recomputes
//! everything, and recomputation is deterministic.

use nalgebra::{Matrix3, Point3, Vector3};
use rayon::prelude::*;

use super::adjacency::EdgeAdjacency;
use super::topology::{EdgeSlot, TriMesh};
use crate::error::{GravityError, Result};

/// Cross products with squared norm below this are treated as zero area.
const DEGENERATE_AREA_EPS: f64 = 1e-24;

/// Derived geometric quantities of one face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGeometry {
    /// Unit outward normal.
    pub normal: Vector3<f64>,
    /// Outer product of the normal with itself.
    pub normal_dyad: Matrix3<f64>,
    /// Face centroid.
    pub centroid: Point3<f64>,
    /// Per edge slot, the unit vector in the face plane pointing outward,
    /// perpendicular to that edge.
    pub edge_normals: [Vector3<f64>; 3],
}

/// All per-face and per-edge records needed by the field evaluator.
///
/// Owns the [`EdgeAdjacency`] it was built against so the evaluator can
/// iterate unique edges without re-resolving twins.
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    faces: Vec<FaceGeometry>,
    edge_dyads: Vec<[Matrix3<f64>; 3]>,
    adjacency: EdgeAdjacency,
}

impl MeshGeometry {
    /// Build all geometry records for a mesh snapshot.
    ///
    /// # Errors
    /// Returns [`GravityError::ZeroAreaFace`] for degenerate triangles, or
    /// any adjacency error from [`EdgeAdjacency::resolve`]. A missing twin
    /// never reaches the edge-dyad pass: resolution fails the mesh first.
    pub fn build(mesh: &TriMesh) -> Result<Self> {
        // Stage 1: per-face normals, dyads, and edge normals.
        let faces: Vec<FaceGeometry> = (0..mesh.num_faces())
            .into_par_iter()
            .map(|f| face_geometry(mesh, f))
            .collect::<Result<_>>()?;

        // Stage 2: twin resolution (the join point before edge dyads).
        let adjacency = EdgeAdjacency::resolve(mesh)?;

        // Stage 3: per-face edge dyads from both sides of each edge.
        let edge_dyads: Vec<[Matrix3<f64>; 3]> = (0..mesh.num_faces())
            .into_par_iter()
            .map(|f| {
                EdgeSlot::ALL.map(|slot| {
                    let (tf, ts) = adjacency.twin(f, slot);
                    let own = &faces[f];
                    let adj = &faces[tf];
                    own.normal * own.edge_normals[slot.index()].transpose()
                        + adj.normal * adj.edge_normals[ts.index()].transpose()
                })
            })
            .collect();

        Ok(Self { faces, edge_dyads, adjacency })
    }

    /// Geometry record of a face.
    #[inline]
    pub fn face(&self, f: usize) -> &FaceGeometry {
        &self.faces[f]
    }

    /// All face geometry records.
    #[inline]
    pub fn faces(&self) -> &[FaceGeometry] {
        &self.faces
    }

    /// Edge dyad of a face's edge slot.
    #[inline]
    pub fn edge_dyad(&self, f: usize, slot: EdgeSlot) -> &Matrix3<f64> {
        &self.edge_dyads[f][slot.index()]
    }

    /// The twin relation the geometry was built against.
    #[inline]
    pub fn adjacency(&self) -> &EdgeAdjacency {
        &self.adjacency
    }
}

fn face_geometry(mesh: &TriMesh, f: usize) -> Result<FaceGeometry> {
    let e1 = mesh.edge_vector(f, EdgeSlot::E1);
    let e2 = mesh.edge_vector(f, EdgeSlot::E2);
    let e3 = mesh.edge_vector(f, EdgeSlot::E3);

    let cross = e1.cross(&e2);
    if cross.norm_squared() < DEGENERATE_AREA_EPS {
        return Err(GravityError::ZeroAreaFace { face: f });
    }
    let normal = cross.normalize();

    let edge_normals = [
        e1.cross(&normal).normalize(),
        e2.cross(&normal).normalize(),
        e3.cross(&normal).normalize(),
    ];

    Ok(FaceGeometry {
        normal,
        normal_dyad: normal * normal.transpose(),
        centroid: mesh.face_centroid(f),
        edge_normals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> TriMesh {
        let vertices = vec![
            Point3::new(-0.5, -0.5, -0.5),
            Point3::new(-0.5, -0.5, 0.5),
            Point3::new(-0.5, 0.5, -0.5),
            Point3::new(-0.5, 0.5, 0.5),
            Point3::new(0.5, -0.5, -0.5),
            Point3::new(0.5, -0.5, 0.5),
            Point3::new(0.5, 0.5, -0.5),
            Point3::new(0.5, 0.5, 0.5),
        ];
        let faces = vec![
            [0, 6, 4],
            [0, 2, 6],
            [0, 3, 2],
            [0, 1, 3],
            [2, 7, 6],
            [2, 3, 7],
            [4, 6, 7],
            [4, 7, 5],
            [0, 4, 5],
            [0, 5, 1],
            [1, 5, 7],
            [1, 7, 3],
        ];
        TriMesh::new(vertices, faces).unwrap()
    }

    #[test]
    fn test_cube_normals_outward() {
        let mesh = unit_cube();
        let geometry = MeshGeometry::build(&mesh).unwrap();

        for f in 0..mesh.num_faces() {
            let record = geometry.face(f);
            assert!((record.normal.norm() - 1.0).abs() < 1e-12);
            // Outward means pointing away from the cube center (origin).
            assert!(record.normal.dot(&record.centroid.coords) > 0.0);
        }

        // Faces 0 and 1 form the bottom of the cube.
        assert!((geometry.face(0).normal - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
        assert!((geometry.face(1).normal - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_edge_normals_in_plane_and_outward() {
        let mesh = unit_cube();
        let geometry = MeshGeometry::build(&mesh).unwrap();

        for f in 0..mesh.num_faces() {
            let record = geometry.face(f);
            for slot in EdgeSlot::ALL {
                let en = record.edge_normals[slot.index()];
                let edge = mesh.edge_vector(f, slot);
                let (o, d) = mesh.directed_edge(f, slot);
                let midpoint = (mesh.position(o).coords + mesh.position(d).coords) * 0.5;

                assert!((en.norm() - 1.0).abs() < 1e-12);
                // In the face plane and perpendicular to the edge.
                assert!(en.dot(&record.normal).abs() < 1e-12);
                assert!(en.dot(&edge).abs() < 1e-12);
                // Pointing away from the face centroid.
                assert!(en.dot(&(midpoint - record.centroid.coords)) > 0.0);
            }
        }
    }

    #[test]
    fn test_normal_dyads() {
        let mesh = unit_cube();
        let geometry = MeshGeometry::build(&mesh).unwrap();

        for f in 0..mesh.num_faces() {
            let record = geometry.face(f);
            let dyad = record.normal_dyad;
            assert!((dyad - dyad.transpose()).norm() < 1e-15);
            // n nᵀ is idempotent for a unit normal.
            assert!((dyad * dyad - dyad).norm() < 1e-12);
            assert!((dyad * record.normal - record.normal).norm() < 1e-12);
        }
    }

    #[test]
    fn test_edge_dyads_symmetric() {
        let mesh = unit_cube();
        let geometry = MeshGeometry::build(&mesh).unwrap();

        for f in 0..mesh.num_faces() {
            for slot in EdgeSlot::ALL {
                let dyad = geometry.edge_dyad(f, slot);
                assert!(
                    (dyad - dyad.transpose()).norm() < 1e-12,
                    "edge dyad of face {} slot {:?} is not symmetric",
                    f,
                    slot
                );
            }
        }
    }

    #[test]
    fn test_edge_dyads_agree_across_twins() {
        let mesh = unit_cube();
        let geometry = MeshGeometry::build(&mesh).unwrap();

        // Both owning faces of an edge must derive the same dyad.
        for f in 0..mesh.num_faces() {
            for slot in EdgeSlot::ALL {
                let (tf, ts) = geometry.adjacency().twin(f, slot);
                let own = geometry.edge_dyad(f, slot);
                let other = geometry.edge_dyad(tf, ts);
                assert!((own - other).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_rebuild_identical() {
        let mesh = unit_cube();
        let a = MeshGeometry::build(&mesh).unwrap();
        let b = MeshGeometry::build(&mesh).unwrap();

        for f in 0..mesh.num_faces() {
            assert_eq!(a.face(f), b.face(f));
            for slot in EdgeSlot::ALL {
                assert_eq!(a.edge_dyad(f, slot), b.edge_dyad(f, slot));
            }
        }
    }

    #[test]
    fn test_zero_area_face_rejected() {
        // Two back-to-back triangles over collinear vertices: closed, but
        // both faces have zero area.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let mesh = TriMesh::new(vertices, vec![[0, 1, 2], [2, 1, 0]]).unwrap();
        let result = MeshGeometry::build(&mesh);
        assert!(matches!(result, Err(GravityError::ZeroAreaFace { .. })));
    }
}
