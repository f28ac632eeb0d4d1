//! # Regolith
//!
//! Closed-form polyhedral gravity modeling for small solar system bodies.
//!
//! Regolith models the gravitational field of an irregularly-shaped,
//! constant-density body represented as a closed triangulated polyhedron,
//! producing the potential, its gradient (the attraction), and its
//! gradient tensor at arbitrary body-fixed field points via the classical
//! Werner–Scheeres summation.
//!
//! ## Pipeline
//!
//! - [`mesh::TriMesh`] caches vertex positions and triangle index triples.
//! - [`mesh::EdgeAdjacency`] resolves twin edges across faces (and rejects
//!   open, non-manifold, or degenerate meshes).
//! - [`mesh::MeshGeometry`] precomputes per-face normal dyads and per-edge
//!   dyads, in parallel.
//! - [`body::Asteroid`] binds catalogued physical constants (density,
//!   spin rate, semi-axes) to a mesh and its geometry.
//! - [`gravity::polyhedron_potential`] evaluates the field; geometry is
//!   derived once and reused across evaluations until the mesh changes.
//!
//! ## Quick Start
//!
//! ```
//! use regolith::prelude::*;
//! use nalgebra::Point3;
//!
//! // A unit cube standing in for an asteroid shape model.
//! let vertices = vec![
//!     Point3::new(-0.5, -0.5, -0.5),
//!     Point3::new(-0.5, -0.5, 0.5),
//!     Point3::new(-0.5, 0.5, -0.5),
//!     Point3::new(-0.5, 0.5, 0.5),
//!     Point3::new(0.5, -0.5, -0.5),
//!     Point3::new(0.5, -0.5, 0.5),
//!     Point3::new(0.5, 0.5, -0.5),
//!     Point3::new(0.5, 0.5, 0.5),
//! ];
//! let faces = vec![
//!     [0, 6, 4], [0, 2, 6], [0, 3, 2], [0, 1, 3],
//!     [2, 7, 6], [2, 3, 7], [4, 6, 7], [4, 7, 5],
//!     [0, 4, 5], [0, 5, 1], [1, 5, 7], [1, 7, 3],
//! ];
//!
//! let mut asteroid = Asteroid::new("cube", &vertices, &faces).unwrap();
//!
//! // Evaluate the field at a body-fixed point.
//! let field = asteroid.potential(&Point3::new(2.0, 0.0, 0.0)).unwrap();
//! assert!(field.potential > 0.0);
//! assert!(field.attraction.x < 0.0); // pulls back toward the body
//!
//! // Advance the body's spin to a new epoch (full geometry rebuild).
//! asteroid.update_rotation(3600.0).unwrap();
//! ```
//!
//! ## Units
//!
//! Kilometers, kilograms, seconds, radians throughout; densities in
//! kg/km³ and [`gravity::G`] in km³/(kg·s²).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod body;
pub mod error;
pub mod gravity;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use regolith::prelude::*;
/// ```
pub mod prelude {
    pub use crate::body::{Asteroid, BodyConstants, CATALOGUE};
    pub use crate::error::{GravityError, Result};
    pub use crate::gravity::{polyhedron_potential, GravityField, G};
    pub use crate::mesh::{EdgeAdjacency, EdgeSlot, FaceGeometry, MeshGeometry, TriMesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
