//! Error types for regolith.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`GravityError`].
pub type Result<T> = std::result::Result<T, GravityError>;

/// Errors that can occur during mesh processing or field evaluation.
#[derive(Error, Debug)]
pub enum GravityError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has duplicate vertex indices (degenerate triangle).
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A face has (numerically) zero area, so its normal is undefined.
    #[error("face {face} has zero area")]
    ZeroAreaFace {
        /// The face index.
        face: usize,
    },

    /// An edge has only one incident face. The polyhedral model requires
    /// a closed surface, so boundary edges make the mesh invalid.
    #[error("edge ({v0}, {v1}) is open (only one incident face); mesh is not closed")]
    OpenEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// An edge is shared by more than two faces, or by two faces with the
    /// same winding direction (inconsistent orientation).
    #[error("edge ({v0}, {v1}) is non-manifold: {details}")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
        /// Description of the non-manifold condition.
        details: String,
    },

    /// A face appears on both sides of one of its own edges.
    #[error("face {face} is adjacent to itself across edge ({v0}, {v1})")]
    SelfAdjacentFace {
        /// The offending face index.
        face: usize,
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// The requested body name is not in the catalogue.
    #[error("unknown body {name:?}; not in the catalogue")]
    UnknownBody {
        /// The requested name.
        name: String,
    },

    /// The field point sits on (or pathologically close to) a vertex, edge,
    /// or face of the polyhedron, where the closed-form model is singular.
    #[error("field point ({x}, {y}, {z}) is on or too close to the polyhedron surface")]
    DegenerateFieldPoint {
        /// Field point x coordinate.
        x: f64,
        /// Field point y coordinate.
        y: f64,
        /// Field point z coordinate.
        z: f64,
    },
}
