//! Closed-form polyhedral gravity evaluation.
//!
//! This module implements the Werner–Scheeres summation for the exterior
//! gravitational field of a constant-density polyhedron. Given a field
//! point `p` in body-fixed coordinates, every face contributes a
//! solid-angle factor and every unique edge a line-integral factor:
//!
//! - face `f`, with `rᵢ = vᵢ − p` in winding order and `Rᵢ = |rᵢ|`:
//!   `ω_f = 2 atan2(r₁·(r₂×r₃), R₁R₂R₃ + R₁ r₂·r₃ + R₂ r₃·r₁ + R₃ r₁·r₂)`
//! - edge `e` of length `ℓ` whose endpoints lie at ranges `a` and `b`:
//!   `L_e = ln((a + b + ℓ) / (a + b − ℓ))`
//!
//! weighted by the face normal dyad `F_f` and edge dyad `E_e` from
//! [`MeshGeometry`]:
//!
//! ```text
//! U    = Gσ/2 (Σ_e r_e·E_e·r_e L_e − Σ_f r_f·F_f·r_f ω_f)
//! ∇U   =  −Gσ (Σ_e E_e r_e L_e     − Σ_f F_f r_f ω_f)
//! ∇∇U  =   Gσ (Σ_e E_e L_e         − Σ_f F_f ω_f)
//! ∇²U  =  −Gσ  Σ_f ω_f
//! ```
//!
//! Each unique edge is summed once (via the adjacency representative
//! list), never once per owning face. The Laplacian is `−4πGσ` inside the
//! body and vanishes outside, which makes it a cheap consistency check
//! rather than a primary output.
//!
//! The closed form is singular when the field point lies on a vertex or
//! on an edge segment; those cases are detected and reported as
//! [`GravityError::DegenerateFieldPoint`] instead of producing NaN or Inf.
//!
//! # References
//!
//! - Werner, R. A., Scheeres, D. J. (1997). "Exterior gravitation of a
//!   polyhedron derived and compared with harmonic and mascon
//!   gravitation representations of asteroid 4769 Castalia."
//!   Celestial Mechanics and Dynamical Astronomy 65, 313-344.

use nalgebra::{Matrix3, Point3, Vector3};
use rayon::prelude::*;

use crate::error::{GravityError, Result};
use crate::mesh::{EdgeSlot, MeshGeometry, TriMesh};

/// Gravitational constant in km³/(kg·s²).
pub const G: f64 = 6.673e-20;

/// Near-zero threshold below which the closed form is treated as singular.
const SINGULARITY_EPS: f64 = 1e-10;

/// Gravitational field quantities at one body-fixed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    /// Potential U (positive, km²/s²).
    pub potential: f64,
    /// Gradient ∇U: the gravitational acceleration, pointing toward the
    /// body (km/s²).
    pub attraction: Vector3<f64>,
    /// Gradient tensor ∇∇U (symmetric, 1/s²).
    pub gradient_matrix: Matrix3<f64>,
    /// Laplacian ∇²U: `−4πGσ` inside the body, ≈0 outside (1/s²).
    pub laplacian: f64,
}

/// Running face sums: weighted potential/gradient/tensor terms plus the
/// raw solid-angle total for the Laplacian.
#[derive(Debug, Clone, Copy)]
struct FaceSum {
    potential: f64,
    attraction: Vector3<f64>,
    gradient: Matrix3<f64>,
    solid_angle: f64,
}

impl FaceSum {
    fn zero() -> Self {
        Self {
            potential: 0.0,
            attraction: Vector3::zeros(),
            gradient: Matrix3::zeros(),
            solid_angle: 0.0,
        }
    }

    fn add(self, other: Self) -> Self {
        Self {
            potential: self.potential + other.potential,
            attraction: self.attraction + other.attraction,
            gradient: self.gradient + other.gradient,
            solid_angle: self.solid_angle + other.solid_angle,
        }
    }
}

/// Running edge sums.
#[derive(Debug, Clone, Copy)]
struct EdgeSum {
    potential: f64,
    attraction: Vector3<f64>,
    gradient: Matrix3<f64>,
}

impl EdgeSum {
    fn zero() -> Self {
        Self {
            potential: 0.0,
            attraction: Vector3::zeros(),
            gradient: Matrix3::zeros(),
        }
    }

    fn add(self, other: Self) -> Self {
        Self {
            potential: self.potential + other.potential,
            attraction: self.attraction + other.attraction,
            gradient: self.gradient + other.gradient,
        }
    }
}

/// Evaluate potential, attraction, gradient tensor, and Laplacian at a
/// body-fixed field point.
///
/// Face and edge sums run as independent parallel reductions over the
/// precomputed geometry; the geometry itself is read-only here, so any
/// number of evaluations may run concurrently.
///
/// # Errors
/// Returns [`GravityError::DegenerateFieldPoint`] if the point coincides
/// with a vertex or lies on an edge segment. Such an error never affects
/// the precomputed geometry or later evaluations.
pub fn polyhedron_potential(
    mesh: &TriMesh,
    geometry: &MeshGeometry,
    density: f64,
    point: &Point3<f64>,
) -> Result<GravityField> {
    let faces = (0..mesh.num_faces())
        .into_par_iter()
        .map(|f| face_terms(mesh, geometry, f, point))
        .try_reduce(FaceSum::zero, |a, b| Ok(a.add(b)))?;

    let edges = geometry
        .adjacency()
        .unique_edges()
        .par_iter()
        .map(|&(f, slot)| edge_terms(mesh, geometry, f, slot, point))
        .try_reduce(EdgeSum::zero, |a, b| Ok(a.add(b)))?;

    let g_sigma = G * density;
    Ok(GravityField {
        potential: 0.5 * g_sigma * (edges.potential - faces.potential),
        attraction: -g_sigma * (edges.attraction - faces.attraction),
        gradient_matrix: g_sigma * (edges.gradient - faces.gradient),
        laplacian: -g_sigma * faces.solid_angle,
    })
}

fn degenerate(point: &Point3<f64>) -> GravityError {
    GravityError::DegenerateFieldPoint {
        x: point.x,
        y: point.y,
        z: point.z,
    }
}

/// Solid-angle-weighted contribution of one face.
fn face_terms(
    mesh: &TriMesh,
    geometry: &MeshGeometry,
    f: usize,
    point: &Point3<f64>,
) -> Result<FaceSum> {
    let [p1, p2, p3] = mesh.face_positions(f);
    let r1 = p1 - point;
    let r2 = p2 - point;
    let r3 = p3 - point;

    let n1 = r1.norm();
    let n2 = r2.norm();
    let n3 = r3.norm();
    if n1 < SINGULARITY_EPS || n2 < SINGULARITY_EPS || n3 < SINGULARITY_EPS {
        return Err(degenerate(point));
    }

    let num = r1.dot(&r2.cross(&r3));
    let den = n1 * n2 * n3 + n1 * r2.dot(&r3) + n2 * r3.dot(&r1) + n3 * r1.dot(&r2);
    if num.abs() < SINGULARITY_EPS && den.abs() < SINGULARITY_EPS {
        return Err(degenerate(point));
    }
    let w = 2.0 * num.atan2(den);

    let dyad = geometry.face(f).normal_dyad;
    let fr = dyad * r1;

    Ok(FaceSum {
        potential: r1.dot(&fr) * w,
        attraction: fr * w,
        gradient: dyad * w,
        solid_angle: w,
    })
}

/// Log-weighted contribution of one unique edge, identified by its
/// representative (face, slot).
fn edge_terms(
    mesh: &TriMesh,
    geometry: &MeshGeometry,
    f: usize,
    slot: EdgeSlot,
    point: &Point3<f64>,
) -> Result<EdgeSum> {
    let (o, d) = mesh.directed_edge(f, slot);
    let r_o = mesh.position(o) - point;
    let r_d = mesh.position(d) - point;

    let a = r_o.norm();
    let b = r_d.norm();
    let length = (r_d - r_o).norm();

    // a + b − ℓ vanishes exactly when the point lies on the edge segment.
    let deficit = a + b - length;
    if deficit < SINGULARITY_EPS {
        return Err(degenerate(point));
    }
    let le = ((a + b + length) / deficit).ln();

    let dyad = geometry.edge_dyad(f, slot);
    let er = dyad * r_o;

    Ok(EdgeSum {
        potential: r_o.dot(&er) * le,
        attraction: er * le,
        gradient: dyad * le,
    })
}
