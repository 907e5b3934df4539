use tracing::trace;

use super::{Dcel, FaceId};
use crate::geometry::{half_plane_sign, Coord};

impl Dcel {
    /// First bounded face (registration order) that strictly contains `p`.
    ///
    /// A face contains `p` when `p` is strictly on the interior side of every
    /// boundary edge. Points on any boundary, shared chords included, belong
    /// to no face. Cost is the total length of the face loops visited.
    pub fn locate(&self, p: Coord) -> Option<FaceId> {
        let found = self
            .faces
            .iter()
            .find(|face| {
                self.face_cycle(face.edge).all(|e| {
                    let he = &self.half_edges[e.0];
                    half_plane_sign(he.start, he.end, p) > 0
                })
            })
            .map(|face| face.id);
        trace!(x = p.x, y = p.y, face = ?found, "locate");
        found
    }
}
