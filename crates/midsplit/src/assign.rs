//! Watchtowers and their assignment to located faces.

use tracing::debug;

use crate::dcel::{Dcel, FaceId};
use crate::geometry::Coord;

/// A point entity with a population weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Watchtower {
    pub id: String,
    pub postcode: String,
    pub population: i64,
    pub contact: String,
    pub coord: Coord,
    /// Face the tower was located in; `None` until assigned or when outside.
    pub region: Option<FaceId>,
}

/// Towers attached to one bounded face, by index into the tower slice.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub face: FaceId,
    pub towers: Vec<usize>,
    pub population: i64,
}

/// Locate every tower and fold it into its face.
///
/// Returns one region per bounded face in registration order. Towers that
/// fall outside every face (or on a boundary) keep `region == None`.
pub fn assign_towers(dcel: &Dcel, towers: &mut [Watchtower]) -> Vec<Region> {
    let mut regions: Vec<Region> = dcel
        .faces()
        .iter()
        .map(|f| Region {
            face: f.id,
            towers: Vec::new(),
            population: 0,
        })
        .collect();
    let mut unlocated = 0usize;
    for (k, tower) in towers.iter_mut().enumerate() {
        // Face ids double as positions in `regions`.
        match dcel.locate(tower.coord) {
            Some(face) => {
                tower.region = Some(face);
                let region = &mut regions[face.0 as usize];
                region.towers.push(k);
                region.population += tower.population;
            }
            None => unlocated += 1,
        }
    }
    debug!(towers = towers.len(), unlocated, "towers assigned");
    regions
}
