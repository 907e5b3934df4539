//! Polygon loader: outline → two-face DCEL (bounded face 0, exterior -1).

use tracing::debug;

use super::{Dcel, EdgeId, Face, FaceId, HalfEdge, HalfEdgeIdx, OUTER_FACE};
use crate::error::DcelError;
use crate::geometry::{signed_area, Coord};

impl Dcel {
    /// Build the DCEL of an implicitly closed outline.
    ///
    /// Edge `i` is the segment `outline[i] → outline[i + 1]` (wrapping). Its
    /// registered half-edge bounds face 0 and its pair bounds the exterior;
    /// both share id `i`. A counter-clockwise outline is accepted: the
    /// registered half-edge then runs against the input direction so face 0
    /// is always walked clockwise, which is what the locator expects.
    pub fn from_polygon(outline: &[Coord]) -> Result<Dcel, DcelError> {
        let n = outline.len();
        let invalid = |reason| DcelError::InvalidPolygon {
            vertices: n,
            reason,
        };
        if n < 3 {
            return Err(invalid("need at least 3 vertices"));
        }
        if outline.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(invalid("non-finite coordinate"));
        }
        let area = signed_area(outline);
        if area == 0.0 {
            return Err(invalid("outline has zero area"));
        }
        let clockwise = area < 0.0;

        let mut dcel = Dcel::empty();
        let face = FaceId(dcel.face_ids.next_id() as i64);
        let mut inner = Vec::with_capacity(n);
        let mut outer = Vec::with_capacity(n);
        for i in 0..n {
            let prev = outline[i];
            let cur = outline[(i + 1) % n];
            let (start, end) = if clockwise { (prev, cur) } else { (cur, prev) };
            let id = EdgeId(dcel.edge_ids.next_id());
            let (cw, ccw) = dcel.push_pair(start, end, id, face, OUTER_FACE);
            dcel.registry.push(cw);
            inner.push(cw);
            outer.push(ccw);
        }
        for i in 0..n {
            let succ = (i + 1) % n;
            let pred = (i + n - 1) % n;
            if clockwise {
                dcel.set_next(inner[i], inner[succ]);
                dcel.set_next(outer[succ], outer[i]);
            } else {
                dcel.set_next(inner[i], inner[pred]);
                dcel.set_next(outer[pred], outer[i]);
            }
        }
        dcel.faces.push(Face {
            id: face,
            edge: inner[0],
        });
        debug!(vertices = n, clockwise, area, "polygon loaded");
        Ok(dcel)
    }

    /// Push `start → end` on `face` and its pair on `pair_face`. Links
    /// `next`/`prev` to self until the caller wires them.
    pub(super) fn push_pair(
        &mut self,
        start: Coord,
        end: Coord,
        id: EdgeId,
        face: FaceId,
        pair_face: FaceId,
    ) -> (HalfEdgeIdx, HalfEdgeIdx) {
        let fwd = HalfEdgeIdx(self.half_edges.len());
        let rev = HalfEdgeIdx(fwd.0 + 1);
        self.push_half_edge(HalfEdge {
            start,
            end,
            id,
            face,
            pair: rev,
            next: fwd,
            prev: fwd,
        });
        self.push_half_edge(HalfEdge {
            start: end,
            end: start,
            id,
            face: pair_face,
            pair: fwd,
            next: rev,
            prev: rev,
        });
        (fwd, rev)
    }
}
