//! Mesh data structures and derived geometry.
//!
//! This module provides the triangle-mesh representation and the
//! precomputation pipeline behind the gravity model:
//!
//! - [`TriMesh`] stores vertex positions and face index triples and offers
//!   atomic wholesale replacement.
//! - [`EdgeAdjacency`] resolves, for every directed edge of every face,
//!   the adjacent face carrying the same edge in reverse (its twin).
//! - [`MeshGeometry`] derives the per-face normals and dyads and the
//!   per-edge dyads consumed by the field evaluator.
//!
//! Data flows `TriMesh` → `EdgeAdjacency` → `MeshGeometry`; each stage is
//! recomputed in full whenever the mesh changes.
//!
//! # Construction
//!
//! ```
//! use regolith::mesh::{MeshGeometry, TriMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
//!
//! let mesh = TriMesh::new(vertices, faces).unwrap();
//! let geometry = MeshGeometry::build(&mesh).unwrap();
//! assert_eq!(geometry.adjacency().num_unique_edges(), 6);
//! ```

mod adjacency;
mod geometry;
mod topology;

pub use adjacency::EdgeAdjacency;
pub use geometry::{FaceGeometry, MeshGeometry};
pub use topology::{EdgeSlot, TriMesh};
