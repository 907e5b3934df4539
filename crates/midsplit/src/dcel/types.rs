//! Data types for the half-edge arena.
//!
//! Kept small and explicit so `build`, `split` and `locate` read cleanly.

use std::fmt;

use crate::geometry::Coord;

/// Slot of a half-edge in the arena. Only a [`super::Dcel`] hands these out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeIdx(pub(crate) usize);

/// User-visible edge identifier. A half-edge and its pair share one id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// Face identifier. Bounded faces count up from 0, the exterior is [`OUTER_FACE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub i64);

/// The unbounded exterior. Never split, never located.
pub const OUTER_FACE: FaceId = FaceId(-1);

impl FaceId {
    #[inline]
    pub fn is_outer(self) -> bool {
        self == OUTER_FACE
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Directed boundary segment. `pair`, `next` and `prev` are arena slots,
/// not owners; the arena owns every half-edge.
#[derive(Clone, Debug)]
pub struct HalfEdge {
    pub start: Coord,
    pub end: Coord,
    pub id: EdgeId,
    pub face: FaceId,
    pub pair: HalfEdgeIdx,
    pub next: HalfEdgeIdx,
    pub prev: HalfEdgeIdx,
}

/// Bounded face record with one representative boundary half-edge.
#[derive(Clone, Debug)]
pub struct Face {
    pub id: FaceId,
    pub edge: HalfEdgeIdx,
}

/// Monotone id source. The arena owns one for edges and one for faces, so
/// independent structures never share a sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdCounter {
    next: usize,
}

impl IdCounter {
    /// Post-increment.
    #[inline]
    pub fn next_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }
}
