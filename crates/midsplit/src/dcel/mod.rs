//! Half-edge (DCEL) subdivision of a simple polygon.
//!
//! Purpose
//! - Hold a clockwise polygon and its midpoint-chord subdivisions as a
//!   doubly-connected edge list, and answer "which face contains this point".
//!
//! Ownership
//! - Every half-edge lives in one append-only arena (`Vec<HalfEdge>`);
//!   `pair`/`next`/`prev` are slots into it. Nothing is removed until the whole
//!   `Dcel` is dropped.
//! - The edge registry lists the bounded-side ("clockwise") half-edge for every
//!   id in creation order, so registry position == `EdgeId`. Pairs are reached
//!   through `.pair` only.
//! - Face records are indexed by their id; the exterior has no record.
//!
//! Invariants (checked by [`Dcel::validate`])
//! - `e.pair.pair == e`, `e.pair.start == e.end`, `e.pair.end == e.start`.
//! - `e.next.prev == e`, `e.prev.next == e`.
//! - Walking `next` from a face's representative visits only half-edges of
//!   that face and returns to the start.
//!
//! Code cross-refs: `build::from_polygon`, `split::{resolve_matching, split}`,
//! `locate::locate`, `crate::geometry::half_plane_sign`.

mod build;
mod locate;
mod split;
mod types;

pub use types::{EdgeId, Face, FaceId, HalfEdge, HalfEdgeIdx, IdCounter, OUTER_FACE};

use crate::error::DcelError;
use crate::geometry::Coord;

/// Arena-backed DCEL. Built by [`Dcel::from_polygon`], grown by [`Dcel::split`].
#[derive(Clone, Debug)]
pub struct Dcel {
    half_edges: Vec<HalfEdge>,
    registry: Vec<HalfEdgeIdx>,
    faces: Vec<Face>,
    edge_ids: IdCounter,
    face_ids: IdCounter,
}

impl Dcel {
    fn empty() -> Self {
        Self {
            half_edges: Vec::new(),
            registry: Vec::new(),
            faces: Vec::new(),
            edge_ids: IdCounter::default(),
            face_ids: IdCounter::default(),
        }
    }

    pub fn num_half_edges(&self) -> usize {
        self.half_edges.len()
    }

    /// Bounded faces only.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Panics on a slot from another structure; slots from this one are always valid.
    pub fn half_edge(&self, idx: HalfEdgeIdx) -> &HalfEdge {
        &self.half_edges[idx.0]
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    /// Bounded faces in registration order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, id: FaceId) -> Option<&Face> {
        usize::try_from(id.0).ok().and_then(|i| self.faces.get(i))
    }

    /// Bounded-side half-edges, one per edge id, in creation order.
    pub fn registry(&self) -> &[HalfEdgeIdx] {
        &self.registry
    }

    /// Registry lookup for a user-supplied id.
    pub fn registered(&self, id: i64) -> Result<HalfEdgeIdx, DcelError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.registry.get(i).copied())
            .ok_or(DcelError::UnknownEdge {
                id,
                registered: self.registry.len(),
            })
    }

    /// Half-edges around the face of `start`, beginning at `start`.
    pub fn face_cycle(&self, start: HalfEdgeIdx) -> FaceCycle<'_> {
        FaceCycle {
            dcel: self,
            start,
            current: start,
            done: false,
        }
    }

    /// Boundary vertices of a bounded face, in walk order.
    pub fn face_vertices(&self, id: FaceId) -> Option<Vec<Coord>> {
        let face = self.face(id)?;
        Some(
            self.face_cycle(face.edge)
                .map(|e| self.half_edges[e.0].start)
                .collect(),
        )
    }

    fn push_half_edge(&mut self, he: HalfEdge) -> HalfEdgeIdx {
        let idx = HalfEdgeIdx(self.half_edges.len());
        self.half_edges.push(he);
        idx
    }

    /// Set `he.next = next` and `next.prev = he`.
    fn set_next(&mut self, he: HalfEdgeIdx, next: HalfEdgeIdx) {
        self.half_edges[he.0].next = next;
        self.half_edges[next.0].prev = he;
    }

    /// Check every structural invariant. Intended for tests and debugging.
    pub fn validate(&self) -> Result<(), DcelError> {
        let n = self.half_edges.len();
        let corrupt = |i: usize, reason| DcelError::Corrupt {
            edge: HalfEdgeIdx(i),
            reason,
        };
        for (i, e) in self.half_edges.iter().enumerate() {
            if e.pair.0 >= n || e.next.0 >= n || e.prev.0 >= n {
                return Err(corrupt(i, "link out of range"));
            }
            let pair = &self.half_edges[e.pair.0];
            if pair.pair.0 != i {
                return Err(corrupt(i, "pair is not involutive"));
            }
            if pair.start != e.end || pair.end != e.start {
                return Err(corrupt(i, "pair endpoints do not mirror"));
            }
            if pair.id != e.id {
                return Err(corrupt(i, "pair carries a different id"));
            }
            if pair.face == e.face {
                return Err(corrupt(i, "same face on both sides"));
            }
            if self.half_edges[e.next.0].prev.0 != i {
                return Err(corrupt(i, "next.prev is not self"));
            }
            if self.half_edges[e.prev.0].next.0 != i {
                return Err(corrupt(i, "prev.next is not self"));
            }
            if self.half_edges[e.next.0].start != e.end {
                return Err(corrupt(i, "next does not start at end"));
            }
            if self.half_edges[e.next.0].face != e.face {
                return Err(corrupt(i, "next bounds another face"));
            }
            if !e.face.is_outer() && self.face(e.face).is_none() {
                return Err(corrupt(i, "face has no record"));
            }
        }
        for (k, face) in self.faces.iter().enumerate() {
            if face.id.0 != k as i64 {
                return Err(corrupt(face.edge.0, "face record out of order"));
            }
            if self.half_edges[face.edge.0].face != face.id {
                return Err(corrupt(face.edge.0, "representative bounds another face"));
            }
            let steps = self.face_cycle(face.edge).take(n + 1).count();
            if steps > n {
                return Err(corrupt(face.edge.0, "face cycle does not close"));
            }
        }
        for (k, &idx) in self.registry.iter().enumerate() {
            if self.half_edges[idx.0].id != EdgeId(k) {
                return Err(corrupt(idx.0, "registry slot does not match id"));
            }
        }
        Ok(())
    }
}

/// Iterator over the half-edges of one face cycle.
pub struct FaceCycle<'a> {
    dcel: &'a Dcel,
    start: HalfEdgeIdx,
    current: HalfEdgeIdx,
    done: bool,
}

impl Iterator for FaceCycle<'_> {
    type Item = HalfEdgeIdx;

    fn next(&mut self) -> Option<HalfEdgeIdx> {
        if self.done {
            return None;
        }
        let he = self.current;
        self.current = self.dcel.half_edges[he.0].next;
        if self.current == self.start {
            self.done = true;
        }
        Some(he)
    }
}

#[cfg(test)]
mod tests;
