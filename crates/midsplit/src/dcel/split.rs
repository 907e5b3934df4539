//! Midpoint split: cut a face along the chord between two edge midpoints.
//!
//! Naming follows the picture of a face `F` walked clockwise:
//!
//! ```text
//!   ... -> a -> ... -> b -> ...        (before, on F)
//!   a -> chord -> b -> ...              (after, F keeps a's tail and b's head)
//!   chord' -> a1 -> ... -> b1 -> chord' (after, new face F')
//! ```
//!
//! `a` is shortened to end at its midpoint and `a1` carries the rest; `b` is
//! shortened to start at its midpoint and `b1` carries its first half. `a2`
//! and `b2` are the matching pieces on the far side of each donor edge.

use tracing::debug;

use super::{Dcel, EdgeId, Face, FaceId, HalfEdge, HalfEdgeIdx};
use crate::error::DcelError;
use crate::geometry::midpoint;

impl Dcel {
    /// Resolve two registry ids to the unique pair of half-edges (from
    /// `{a, a.pair} x {b, b.pair}`) that bound one common bounded face.
    pub fn resolve_matching(
        &self,
        a: i64,
        b: i64,
    ) -> Result<(HalfEdgeIdx, HalfEdgeIdx), DcelError> {
        let a = self.registered(a)?;
        let b = self.registered(b)?;
        self.match_half_edges(a, b)
    }

    fn match_half_edges(
        &self,
        a: HalfEdgeIdx,
        b: HalfEdgeIdx,
    ) -> Result<(HalfEdgeIdx, HalfEdgeIdx), DcelError> {
        let (ea, eb) = (self.half_edge(a), self.half_edge(b));
        if ea.id == eb.id {
            return Err(DcelError::DegenerateSplit { id: ea.id });
        }
        let candidates = [a, ea.pair];
        let others = [b, eb.pair];
        let mut found = Vec::with_capacity(1);
        for &u in &candidates {
            for &v in &others {
                let fu = self.half_edge(u).face;
                if fu == self.half_edge(v).face && !fu.is_outer() {
                    found.push((u, v));
                }
            }
        }
        match found.as_slice() {
            [only] => Ok(*only),
            _ => Err(DcelError::AmbiguousOrMissingMatch {
                a: ea.id,
                b: eb.id,
                matches: found.len(),
            }),
        }
    }

    /// Split the face shared by registry edges `a` and `b` and return the new face.
    ///
    /// The new face's record points at the reversed chord; the old face's
    /// representative moves to the forward chord, so both records stay valid
    /// whatever pieces the donors were cut into.
    pub fn split(&mut self, a: i64, b: i64) -> Result<FaceId, DcelError> {
        let (a, b) = self.resolve_matching(a, b)?;
        self.split_half_edges(a, b)
    }

    /// Split on two half-edges already known to bound the same bounded face.
    pub fn split_half_edges(
        &mut self,
        a: HalfEdgeIdx,
        b: HalfEdgeIdx,
    ) -> Result<FaceId, DcelError> {
        let len = self.half_edges.len();
        if let Some(&idx) = [a, b].iter().find(|idx| idx.0 >= len) {
            return Err(DcelError::UnknownHalfEdge { idx, len });
        }
        let (ea, eb) = (self.half_edge(a).clone(), self.half_edge(b).clone());
        if ea.id == eb.id {
            return Err(DcelError::DegenerateSplit { id: ea.id });
        }
        if ea.face != eb.face || ea.face.is_outer() {
            return Err(DcelError::AmbiguousOrMissingMatch {
                a: ea.id,
                b: eb.id,
                matches: 0,
            });
        }
        let (ap, bp) = (ea.pair, eb.pair);
        let (eap, ebp) = (self.half_edge(ap).clone(), self.half_edge(bp).clone());

        // Read everything from the full-length donors before mutating.
        let mid_a = midpoint(ea.start, ea.end);
        let mid_b = midpoint(eb.start, eb.end);
        let adj_ab = ea.next == b;
        let adj_ba = eap.prev == bp;
        if adj_ba && !adj_ab {
            return Err(DcelError::AdjacencyMismatch { a: ea.id, b: eb.id });
        }

        let old_face = ea.face;
        let new_face = FaceId(self.face_ids.next_id() as i64);
        let chord_id = EdgeId(self.edge_ids.next_id());
        let a_id = EdgeId(self.edge_ids.next_id());
        let b_id = EdgeId(self.edge_ids.next_id());

        let base = self.half_edges.len();
        let chord = HalfEdgeIdx(base);
        let chord_rev = HalfEdgeIdx(base + 1);
        let a1 = HalfEdgeIdx(base + 2);
        let a2 = HalfEdgeIdx(base + 3);
        let b1 = HalfEdgeIdx(base + 4);
        let b2 = HalfEdgeIdx(base + 5);

        self.push_half_edge(HalfEdge {
            start: mid_a,
            end: mid_b,
            id: chord_id,
            face: old_face,
            pair: chord_rev,
            next: b,
            prev: a,
        });
        self.push_half_edge(HalfEdge {
            start: mid_b,
            end: mid_a,
            id: chord_id,
            face: new_face,
            pair: chord,
            next: a1,
            prev: b1,
        });
        self.push_half_edge(HalfEdge {
            start: mid_a,
            end: ea.end,
            id: a_id,
            face: new_face,
            pair: a2,
            next: if adj_ab { b1 } else { ea.next },
            prev: chord_rev,
        });
        self.push_half_edge(HalfEdge {
            start: ea.end,
            end: mid_a,
            id: a_id,
            face: eap.face,
            pair: a1,
            next: ap,
            prev: if adj_ba { b2 } else { eap.prev },
        });
        self.push_half_edge(HalfEdge {
            start: eb.start,
            end: mid_b,
            id: b_id,
            face: new_face,
            pair: b2,
            next: chord_rev,
            prev: if adj_ab { a1 } else { eb.prev },
        });
        self.push_half_edge(HalfEdge {
            start: mid_b,
            end: eb.start,
            id: b_id,
            face: ebp.face,
            pair: b1,
            next: if adj_ba { a2 } else { ebp.next },
            prev: bp,
        });

        // Outside neighbours of the donors now meet the new pieces.
        if !adj_ab {
            self.half_edges[ea.next.0].prev = a1;
            self.half_edges[eb.prev.0].next = b1;
        }
        if !adj_ba {
            self.half_edges[eap.prev.0].next = a2;
            self.half_edges[ebp.next.0].prev = b2;
        }

        // Shrink the donors in place.
        {
            let e = &mut self.half_edges[a.0];
            e.end = mid_a;
            e.next = chord;
        }
        {
            let e = &mut self.half_edges[ap.0];
            e.start = mid_a;
            e.prev = a2;
        }
        {
            let e = &mut self.half_edges[b.0];
            e.start = mid_b;
            e.prev = chord;
        }
        {
            let e = &mut self.half_edges[bp.0];
            e.end = mid_b;
            e.next = b2;
        }

        self.registry.extend([chord, a1, b1]);

        // Carry the new id around the rest of the new loop.
        let mut cur = self.half_edges[a1.0].next;
        while cur != b1 {
            self.half_edges[cur.0].face = new_face;
            cur = self.half_edges[cur.0].next;
        }

        self.faces.push(Face {
            id: new_face,
            edge: chord_rev,
        });
        if let Some(old) = usize::try_from(old_face.0)
            .ok()
            .and_then(|i| self.faces.get_mut(i))
        {
            old.edge = chord;
        }

        debug!(
            a = %ea.id,
            b = %eb.id,
            old_face = %old_face,
            new_face = %new_face,
            adjacent = adj_ab,
            "face split"
        );
        Ok(new_face)
    }
}
