//! Seeded fixtures: clockwise convex outlines and random split sequences.
//!
//! Outlines put `n` vertices on a circle at strictly decreasing angles, one
//! per angular slot, so they are convex and clockwise by construction.
//! Everything is driven by a `u64` seed through `StdRng`, so a failing
//! property case replays exactly.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dcel::{Dcel, FaceId, HalfEdgeIdx};
use crate::error::DcelError;
use crate::geometry::{parallelogram_area, vector, Coord};

/// Clockwise convex outline with `n` (at least 3) vertices on a circle of `radius`.
pub fn circle_outline(n: usize, radius: f64, seed: u64) -> Vec<Coord> {
    let n = n.max(3);
    let mut rng = StdRng::seed_from_u64(seed);
    let slot = TAU / n as f64;
    let phase = rng.gen::<f64>() * TAU;
    (0..n)
        .map(|k| {
            // Stay in the first 80% of the slot so neighbours never coincide.
            let th = phase - (k as f64 + rng.gen_range(0.0..0.8)) * slot;
            Coord::new(radius * th.cos(), radius * th.sin())
        })
        .collect()
}

/// Apply `rounds` random midpoint splits and return the new face ids.
///
/// Each round picks a bounded face and two of its boundary half-edges that
/// are not parallel, so every new face keeps a positive area and convex
/// faces stay convex.
pub fn split_randomly(
    dcel: &mut Dcel,
    rounds: usize,
    seed: u64,
) -> Result<Vec<FaceId>, DcelError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut created = Vec::with_capacity(rounds);
    for _ in 0..rounds {
        let face = dcel.faces()[rng.gen_range(0..dcel.num_faces())].clone();
        let cycle: Vec<HalfEdgeIdx> = dcel.face_cycle(face.edge).collect();
        let a = cycle[rng.gen_range(0..cycle.len())];
        let candidates: Vec<HalfEdgeIdx> = cycle
            .iter()
            .copied()
            .filter(|&b| b != a && !parallel(dcel, a, b))
            .collect();
        if candidates.is_empty() {
            continue;
        }
        let b = candidates[rng.gen_range(0..candidates.len())];
        created.push(dcel.split_half_edges(a, b)?);
    }
    Ok(created)
}

fn parallel(dcel: &Dcel, a: HalfEdgeIdx, b: HalfEdgeIdx) -> bool {
    let (ea, eb) = (dcel.half_edge(a), dcel.half_edge(b));
    let u = vector(ea.start, ea.end);
    let v = vector(eb.start, eb.end);
    parallelogram_area(u, v).abs() <= 1e-9 * u.norm() * v.norm()
}
