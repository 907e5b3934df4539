use thiserror::Error;

use crate::dcel::{EdgeId, HalfEdgeIdx};

/// Errors raised while building, splitting or checking a [`crate::dcel::Dcel`].
///
/// Split errors are detected before any half-edge is touched, so a failed
/// split leaves the structure exactly as it was.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DcelError {
    /// The outline cannot bound a face.
    #[error("invalid polygon with {vertices} vertices: {reason}")]
    InvalidPolygon {
        vertices: usize,
        reason: &'static str,
    },
    /// A split named an id that was never registered.
    #[error("unknown edge {id} ({registered} edges registered)")]
    UnknownEdge { id: i64, registered: usize },
    /// A half-edge slot that this structure never allocated.
    #[error("half-edge {idx:?} out of range ({len} half-edges)")]
    UnknownHalfEdge { idx: HalfEdgeIdx, len: usize },
    /// Both split ids resolve to the same boundary segment.
    #[error("cannot split edge {id} against itself")]
    DegenerateSplit { id: EdgeId },
    /// Zero or several of `{a, a.pair} x {b, b.pair}` bound a common face.
    #[error("edges {a} and {b} share {matches} bounded faces, expected exactly one")]
    AmbiguousOrMissingMatch { a: EdgeId, b: EdgeId, matches: usize },
    /// Adjacent on the neighbouring face but not on the face being split.
    #[error("edges {a} and {b} are adjacent across the boundary only")]
    AdjacencyMismatch { a: EdgeId, b: EdgeId },
    /// An invariant check failed.
    #[error("corrupt half-edge {edge:?}: {reason}")]
    Corrupt {
        edge: HalfEdgeIdx,
        reason: &'static str,
    },
}

impl DcelError {
    /// Caller broke the split contract (as opposed to bad input or a broken structure).
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            DcelError::DegenerateSplit { .. }
                | DcelError::AmbiguousOrMissingMatch { .. }
                | DcelError::AdjacencyMismatch { .. }
        )
    }
}
