//! Midpoint-split subdivision of simple polygons.
//!
//! A clockwise polygon is loaded into a half-edge structure ([`dcel::Dcel`]),
//! cut repeatedly along chords joining the midpoints of two edges of one face,
//! and then queried for the face that strictly contains a point.
//! [`assign::assign_towers`] folds weighted points into those faces.
//!
//! Errors from loading and splitting are [`DcelError`] values; a rejected
//! split never mutates the structure.

pub mod assign;
pub mod dcel;
pub mod error;
pub mod geometry;
pub mod rand;

pub use error::DcelError;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::assign::{assign_towers, Region, Watchtower};
    pub use crate::dcel::{Dcel, EdgeId, Face, FaceId, HalfEdge, HalfEdgeIdx, OUTER_FACE};
    pub use crate::error::DcelError;
    pub use crate::geometry::{half_plane_sign, midpoint, Coord};
}
