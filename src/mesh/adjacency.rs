//! Edge adjacency resolution.
//!
//! The closed-form gravity model needs, for every directed edge of every
//! face, the unique adjacent face that carries the same undirected edge in
//! reverse orientation (its *twin*). This module resolves all twins in one
//! sorted-key join over the mesh's `3F` directed edges:
//!
//! 1. Tag every directed edge with its (face, slot) and a canonical
//!    undirected key (sorted endpoint pair).
//! 2. Sort all records by key (parallel sort, O(F log F)), breaking ties
//!    by slot then face so that slot 1 takes precedence over slot 2 over
//!    slot 3 and the result is deterministic.
//! 3. Scan equal-key groups: a group of exactly two oppositely-directed
//!    records is a twin pair; anything else is a mesh-validity error.
//!
//! A closed, orientable, manifold triangulation is required. Open edges,
//! over-shared edges, inconsistent winding, and self-adjacent faces are
//! reported as specific [`GravityError`] variants rather than patched.

use rayon::prelude::*;

use super::topology::{EdgeSlot, TriMesh};
use crate::error::{GravityError, Result};

/// One directed edge, tagged with its owning face and slot.
#[derive(Debug, Clone, Copy)]
struct HalfEdgeRec {
    /// Canonical undirected key: endpoints sorted ascending.
    key: (usize, usize),
    /// Origin vertex of the directed edge.
    origin: usize,
    /// Owning face.
    face: usize,
    /// Edge slot within the owning face.
    slot: EdgeSlot,
}

/// Resolved twin relation for every (face, slot) of a closed mesh.
///
/// Produced by [`EdgeAdjacency::resolve`]. For a mesh that survives
/// resolution, every (face, slot) has a twin; meshes where a twin would be
/// missing are rejected with [`GravityError::OpenEdge`] instead of being
/// returned with holes.
#[derive(Debug, Clone)]
pub struct EdgeAdjacency {
    /// `twins[f][s]` is the (face, slot) carrying the reverse of face `f`
    /// slot `s`.
    twins: Vec<[(usize, EdgeSlot); 3]>,
    /// One representative (face, slot) per undirected edge, in canonical
    /// key order.
    unique: Vec<(usize, EdgeSlot)>,
}

impl EdgeAdjacency {
    /// Resolve twin edges for every face of the mesh.
    ///
    /// # Errors
    /// - [`GravityError::OpenEdge`] if any edge has a single incident face.
    /// - [`GravityError::NonManifoldEdge`] if an edge is shared by more
    ///   than two faces, or by two faces winding the same way.
    /// - [`GravityError::SelfAdjacentFace`] if both sides of an edge belong
    ///   to one face (degenerate input).
    pub fn resolve(mesh: &TriMesh) -> Result<Self> {
        let num_f = mesh.num_faces();

        let mut records = Vec::with_capacity(3 * num_f);
        for f in 0..num_f {
            for slot in EdgeSlot::ALL {
                let (o, d) = mesh.directed_edge(f, slot);
                records.push(HalfEdgeRec {
                    key: if o < d { (o, d) } else { (d, o) },
                    origin: o,
                    face: f,
                    slot,
                });
            }
        }

        // Canonical key first; slot before face fixes the precedence order
        // (slot 1, then 2, then 3) and makes the scan deterministic.
        records.par_sort_unstable_by_key(|r| (r.key, r.slot, r.face));

        let mut twins = vec![[(usize::MAX, EdgeSlot::E1); 3]; num_f];
        let mut unique = Vec::with_capacity(3 * num_f / 2);
        // Open edges are reported only after the whole scan, so that a
        // non-manifold or self-adjacency diagnosis elsewhere in the mesh
        // takes precedence over a plain "not closed".
        let mut first_open = None;

        let mut i = 0;
        while i < records.len() {
            let mut j = i + 1;
            while j < records.len() && records[j].key == records[i].key {
                j += 1;
            }
            let group = &records[i..j];
            let (v0, v1) = group[0].key;

            match group {
                [_] => first_open = first_open.or(Some((v0, v1))),
                [a, b] => {
                    if a.face == b.face {
                        return Err(GravityError::SelfAdjacentFace { face: a.face, v0, v1 });
                    }
                    if a.origin == b.origin {
                        return Err(GravityError::NonManifoldEdge {
                            v0,
                            v1,
                            details: "two incident faces wind the same way".to_string(),
                        });
                    }
                    twins[a.face][a.slot.index()] = (b.face, b.slot);
                    twins[b.face][b.slot.index()] = (a.face, a.slot);
                    unique.push((a.face, a.slot));
                }
                _ => {
                    return Err(GravityError::NonManifoldEdge {
                        v0,
                        v1,
                        details: format!("{} incident faces", group.len()),
                    });
                }
            }
            i = j;
        }

        if let Some((v0, v1)) = first_open {
            return Err(GravityError::OpenEdge { v0, v1 });
        }

        // Every record fell into exactly one paired group, so every
        // (face, slot) now has a twin.
        Ok(Self { twins, unique })
    }

    /// The (face, slot) whose directed edge is the reverse of face `f`
    /// slot `s`.
    #[inline]
    pub fn twin(&self, f: usize, slot: EdgeSlot) -> (usize, EdgeSlot) {
        self.twins[f][slot.index()]
    }

    /// One representative (face, slot) per undirected edge.
    ///
    /// The gravity summation iterates this list so that each edge
    /// contributes exactly once, not once per owning face.
    #[inline]
    pub fn unique_edges(&self) -> &[(usize, EdgeSlot)] {
        &self.unique
    }

    /// Number of undirected edges found.
    #[inline]
    pub fn num_unique_edges(&self) -> usize {
        self.unique.len()
    }
}
