use super::*;
use crate::geometry::half_plane_sign;
use crate::rand::{circle_outline, split_randomly};
use nalgebra::vector;
use proptest::prelude::*;

/// The square from the scenarios, listed counter-clockwise.
fn square() -> Dcel {
    Dcel::from_polygon(&[
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
    ])
    .unwrap()
}

fn cw_triangle() -> Dcel {
    Dcel::from_polygon(&[vector![0.0, 0.0], vector![0.0, 6.0], vector![6.0, 0.0]]).unwrap()
}

fn cycle_faces(dcel: &Dcel, face: &Face) -> Vec<FaceId> {
    dcel.face_cycle(face.edge)
        .map(|e| dcel.half_edge(e).face)
        .collect()
}

#[test]
fn loader_builds_two_closed_loops() {
    let dcel = square();
    dcel.validate().unwrap();
    assert_eq!(dcel.num_half_edges(), 8);
    assert_eq!(dcel.num_faces(), 1);
    assert_eq!(dcel.registry().len(), 4);
    let face = &dcel.faces()[0];
    assert_eq!(face.id, FaceId(0));
    assert_eq!(dcel.face_cycle(face.edge).count(), 4);
    let outer_start = dcel.half_edge(face.edge).pair;
    let outer: Vec<_> = dcel.face_cycle(outer_start).collect();
    assert_eq!(outer.len(), 4);
    assert!(outer.iter().all(|&e| dcel.half_edge(e).face == OUTER_FACE));
}

#[test]
fn loader_keeps_clockwise_input_direction() {
    let dcel = cw_triangle();
    dcel.validate().unwrap();
    let e0 = dcel.half_edge(dcel.registry()[0]);
    assert_eq!(e0.start, vector![0.0, 0.0]);
    assert_eq!(e0.end, vector![0.0, 6.0]);
    assert_eq!(e0.face, FaceId(0));
    assert_eq!(dcel.half_edge(e0.pair).face, OUTER_FACE);
    assert_eq!(e0.next, dcel.registry()[1]);
}

#[test]
fn loader_reorients_counter_clockwise_input() {
    let dcel = square();
    // Registry id 0 is still the bottom segment, walked right to left.
    let e0 = dcel.half_edge(dcel.registry()[0]);
    assert_eq!(e0.start, vector![10.0, 0.0]);
    assert_eq!(e0.end, vector![0.0, 0.0]);
    assert_eq!(e0.id, EdgeId(0));
    assert_eq!(e0.next, dcel.registry()[3]);
}

#[test]
fn loader_rejects_short_or_flat_outlines() {
    let two = Dcel::from_polygon(&[vector![0.0, 0.0], vector![1.0, 1.0]]);
    assert!(matches!(two, Err(DcelError::InvalidPolygon { vertices: 2, .. })));
    let flat = Dcel::from_polygon(&[vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]]);
    assert!(matches!(flat, Err(DcelError::InvalidPolygon { .. })));
    let nan = Dcel::from_polygon(&[vector![0.0, 0.0], vector![f64::NAN, 1.0], vector![2.0, 0.0]]);
    assert!(matches!(nan, Err(DcelError::InvalidPolygon { .. })));
}

#[test]
fn unsplit_square_locates_inside_only() {
    let dcel = square();
    assert_eq!(dcel.locate(vector![5.0, 5.0]), Some(FaceId(0)));
    assert_eq!(dcel.locate(vector![15.0, 5.0]), None);
}

#[test]
fn split_bottom_against_top_halves_the_square() {
    let mut dcel = square();
    let new_face = dcel.split(0, 2).unwrap();
    dcel.validate().unwrap();
    assert_eq!(new_face, FaceId(1));
    assert_eq!(dcel.num_faces(), 2);
    assert_eq!(dcel.num_half_edges(), 14);
    assert_eq!(dcel.registry().len(), 7);
    // The cut is x = 5: face 0 keeps the right half.
    assert_eq!(dcel.locate(vector![8.0, 5.0]), Some(FaceId(0)));
    assert_eq!(dcel.locate(vector![2.0, 5.0]), Some(new_face));
    for face in dcel.faces() {
        assert_eq!(dcel.face_cycle(face.edge).count(), 4);
        assert!(cycle_faces(&dcel, face).iter().all(|&f| f == face.id));
    }
    let mut left = dcel.face_vertices(new_face).unwrap();
    left.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    assert_eq!(
        left,
        vec![
            vector![0.0, 0.0],
            vector![0.0, 10.0],
            vector![5.0, 0.0],
            vector![5.0, 10.0]
        ]
    );
}

#[test]
fn points_on_a_chord_belong_to_no_face() {
    // Boundary points are rejected by the strict test; this pins that policy.
    let mut dcel = square();
    dcel.split(0, 2).unwrap();
    assert_eq!(dcel.locate(vector![5.0, 2.0]), None);
    assert_eq!(dcel.locate(vector![5.0, 8.0]), None);
    assert_eq!(dcel.locate(vector![0.0, 5.0]), None);
}

#[test]
fn split_registers_chord_and_donor_pieces() {
    let mut dcel = square();
    dcel.split(0, 2).unwrap();
    let chord = dcel.half_edge(dcel.registry()[4]);
    assert_eq!(chord.id, EdgeId(4));
    assert_eq!(chord.start, vector![5.0, 0.0]);
    assert_eq!(chord.end, vector![5.0, 10.0]);
    assert_eq!(chord.face, FaceId(0));
    assert_eq!(dcel.half_edge(chord.pair).face, FaceId(1));
    assert_eq!(dcel.faces()[0].edge, dcel.registry()[4]);
    assert_eq!(dcel.faces()[1].edge, chord.pair);
    let a1 = dcel.half_edge(dcel.registry()[5]);
    assert_eq!((a1.start, a1.end), (vector![5.0, 0.0], vector![0.0, 0.0]));
    let b1 = dcel.half_edge(dcel.registry()[6]);
    assert_eq!((b1.start, b1.end), (vector![0.0, 10.0], vector![5.0, 10.0]));
    // The exterior loop gained the two far-side pieces.
    let outer = dcel.half_edge(dcel.registry()[0]).pair;
    assert_eq!(dcel.face_cycle(outer).count(), 6);
}

#[test]
fn split_accepts_ids_of_either_orientation() {
    // After the first split, edge 4 is the chord; the left half is on its pair.
    let mut dcel = square();
    dcel.split(0, 2).unwrap();
    let (a, b) = dcel.resolve_matching(4, 3).unwrap();
    assert_eq!(dcel.half_edge(a).face, FaceId(1));
    assert_eq!(dcel.half_edge(b).face, FaceId(1));
    let third = dcel.split(4, 3).unwrap();
    dcel.validate().unwrap();
    assert_eq!(third, FaceId(2));
    // The second cut is y = 5 across the left half; face 1 keeps the top.
    assert_eq!(dcel.locate(vector![4.0, 9.0]), Some(FaceId(1)));
    assert_eq!(dcel.locate(vector![1.0, 2.0]), Some(third));
    assert_eq!(dcel.locate(vector![8.0, 5.0]), Some(FaceId(0)));
    assert_eq!(dcel.locate(vector![1.0, 5.0]), None);
}

#[test]
fn adjacent_edges_cut_off_a_corner() {
    let mut dcel = cw_triangle();
    // Edge 0 runs (0,0)→(0,6), edge 1 runs (0,6)→(6,0): adjacent at (0,6).
    let corner = dcel.split(0, 1).unwrap();
    dcel.validate().unwrap();
    let corner_face = dcel.face(corner).unwrap();
    assert_eq!(dcel.face_cycle(corner_face.edge).count(), 3);
    assert_eq!(dcel.face_cycle(dcel.faces()[0].edge).count(), 4);
    let outer = dcel.half_edge(dcel.registry()[0]).pair;
    assert_eq!(dcel.face_cycle(outer).count(), 5);
    assert_eq!(dcel.locate(vector![0.5, 5.0]), Some(corner));
    assert_eq!(dcel.locate(vector![1.0, 1.0]), Some(FaceId(0)));
}

#[test]
fn wrap_around_adjacency_splits_cleanly() {
    // Edge 2 runs (6,0)→(0,0) and is followed by edge 0 on the loop.
    let mut dcel = cw_triangle();
    let corner = dcel.split(2, 0).unwrap();
    dcel.validate().unwrap();
    assert_eq!(dcel.num_faces(), 2);
    assert_eq!(dcel.locate(vector![1.0, 0.5]), Some(corner));
    assert_eq!(dcel.locate(vector![0.5, 4.0]), Some(FaceId(0)));
}

#[test]
fn second_edge_preceding_the_first_takes_the_long_way() {
    // Edge 2 sits between edge 1 and edge 0 on the loop: b.next == a, a.next != b.
    let mut dcel = cw_triangle();
    let new_face = dcel.split(1, 0).unwrap();
    dcel.validate().unwrap();
    assert_eq!(dcel.face_cycle(dcel.faces()[0].edge).count(), 3);
    assert_eq!(dcel.face_cycle(dcel.face(new_face).unwrap().edge).count(), 4);
    assert_eq!(dcel.locate(vector![0.5, 5.0]), Some(FaceId(0)));
    assert_eq!(dcel.locate(vector![1.0, 1.0]), Some(new_face));
}

#[test]
fn unknown_ids_are_rejected() {
    let mut dcel = square();
    assert!(matches!(
        dcel.split(0, 9),
        Err(DcelError::UnknownEdge { id: 9, registered: 4 })
    ));
    assert!(matches!(dcel.split(-1, 2), Err(DcelError::UnknownEdge { .. })));
}

#[test]
fn edges_without_a_common_face_are_a_contract_violation() {
    let mut dcel = square();
    dcel.split(0, 2).unwrap();
    // Edge 5 (left half of the bottom) and edge 1 (right side) share no bounded face.
    let before = dcel.clone();
    let err = dcel.split(5, 1).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(matches!(
        err,
        DcelError::AmbiguousOrMissingMatch { matches: 0, .. }
    ));
    assert_eq!(dcel.num_half_edges(), before.num_half_edges());
    assert_eq!(dcel.num_faces(), before.num_faces());
    dcel.validate().unwrap();
}

#[test]
fn same_segment_twice_is_a_contract_violation() {
    let mut dcel = square();
    let err = dcel.split(1, 1).unwrap_err();
    assert!(matches!(err, DcelError::DegenerateSplit { id: EdgeId(1) }));
    assert!(err.is_contract_violation());
}

#[test]
fn resolver_counts_every_shared_face() {
    // Hand-label both exterior pairs as one bounded face so two combinations match.
    let mut dcel = square();
    for id in [0, 2] {
        let pair = dcel.half_edge(dcel.registry()[id]).pair;
        dcel.half_edges[pair.0].face = FaceId(7);
    }
    assert!(matches!(
        dcel.resolve_matching(0, 2),
        Err(DcelError::AmbiguousOrMissingMatch { matches: 2, .. })
    ));
}

#[test]
fn halving_a_chord_keeps_both_pieces_on_the_far_face() {
    let mut dcel = square();
    dcel.split(0, 2).unwrap();
    dcel.split(4, 1).unwrap();
    dcel.validate().unwrap();
    let pieces: Vec<HalfEdgeIdx> = dcel
        .registry()
        .iter()
        .copied()
        .filter(|&idx| {
            let e = dcel.half_edge(idx);
            e.start.x == 5.0 && e.end.x == 5.0
        })
        .collect();
    assert_eq!(pieces.len(), 2);
    let far: Vec<FaceId> = pieces
        .iter()
        .map(|&idx| dcel.half_edge(dcel.half_edge(idx).pair).face)
        .collect();
    assert_eq!(far, vec![FaceId(1), FaceId(1)]);
    assert_eq!(dcel.locate(vector![8.0, 2.0]), Some(FaceId(0)));
    assert_eq!(dcel.locate(vector![8.0, 8.0]), Some(FaceId(2)));
}

#[test]
fn locating_twice_gives_the_same_answer() {
    let mut dcel = square();
    dcel.split(0, 2).unwrap();
    dcel.split(4, 1).unwrap();
    for p in [vector![1.0, 1.0], vector![9.0, 9.0], vector![7.0, 2.0], vector![-3.0, 4.0]] {
        assert_eq!(dcel.locate(p), dcel.locate(p));
    }
}

#[test]
fn validate_reports_broken_links() {
    let mut dcel = square();
    let e = dcel.registry()[0];
    let other = dcel.registry()[2];
    dcel.half_edges[e.0].next = other;
    assert!(matches!(dcel.validate(), Err(DcelError::Corrupt { .. })));
}

#[test]
fn half_edge_against_its_own_pair_is_degenerate() {
    let mut dcel = square();
    let e = dcel.registry()[0];
    let pair = dcel.half_edge(e).pair;
    let err = dcel.split_half_edges(e, pair).unwrap_err();
    assert_eq!(err, DcelError::DegenerateSplit { id: EdgeId(0) });
    assert!(err.is_contract_violation());
    assert_eq!(dcel.num_half_edges(), 8);
}

#[test]
fn exterior_half_edges_cannot_be_split() {
    let mut dcel = square();
    let a = dcel.half_edge(dcel.registry()[0]).pair;
    let b = dcel.half_edge(dcel.registry()[2]).pair;
    let err = dcel.split_half_edges(a, b).unwrap_err();
    assert_eq!(
        err,
        DcelError::AmbiguousOrMissingMatch {
            a: EdgeId(0),
            b: EdgeId(2),
            matches: 0
        }
    );
    // Half-edges on two different bounded faces fail the same way.
    dcel.split(0, 2).unwrap();
    let right = dcel.registry()[1];
    let left = dcel.registry()[3];
    assert_ne!(dcel.half_edge(right).face, dcel.half_edge(left).face);
    assert!(matches!(
        dcel.split_half_edges(right, left),
        Err(DcelError::AmbiguousOrMissingMatch { matches: 0, .. })
    ));
    assert_eq!(dcel.num_faces(), 2);
    dcel.validate().unwrap();
}

#[test]
fn adjacency_seen_only_from_outside_is_rejected() {
    let mut dcel = square();
    let (a, b) = (dcel.registry()[0], dcel.registry()[2]);
    let (ap, bp) = (dcel.half_edge(a).pair, dcel.half_edge(b).pair);
    dcel.half_edges[ap.0].prev = bp;
    let err = dcel.split_half_edges(a, b).unwrap_err();
    assert_eq!(
        err,
        DcelError::AdjacencyMismatch {
            a: EdgeId(0),
            b: EdgeId(2)
        }
    );
    assert!(err.is_contract_violation());
    assert_eq!(dcel.num_half_edges(), 8);
    assert_eq!(dcel.num_faces(), 1);
}

#[test]
fn slots_from_another_structure_are_rejected() {
    let mut bigger = square();
    bigger.split(0, 2).unwrap();
    let foreign = bigger.registry()[4];
    let mut dcel = square();
    let own = dcel.registry()[0];
    let err = dcel.split_half_edges(own, foreign).unwrap_err();
    assert_eq!(
        err,
        DcelError::UnknownHalfEdge {
            idx: foreign,
            len: 8
        }
    );
    assert!(!err.is_contract_violation());
    assert_eq!(dcel.num_half_edges(), 8);
}

fn random_outline(seed: u64, n: usize) -> Vec<Coord> {
    circle_outline(n, 100.0, seed)
}

fn centroid(points: &[Coord]) -> Coord {
    points.iter().fold(Coord::zeros(), |acc, p| acc + *p) / points.len() as f64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_split_adds_six_half_edges_and_one_face(seed in 0u64..10_000, n in 3usize..16, rounds in 1usize..24) {
        let outline = random_outline(seed, n);
        let mut dcel = Dcel::from_polygon(&outline).unwrap();
        for round in 0..rounds {
            let (he, faces) = (dcel.num_half_edges(), dcel.num_faces());
            let made = split_randomly(&mut dcel, 1, seed * 100 + round as u64).unwrap();
            prop_assert_eq!(dcel.num_half_edges(), he + 6 * made.len());
            prop_assert_eq!(dcel.num_faces(), faces + made.len());
            prop_assert!(dcel.validate().is_ok());
        }
        for face in dcel.faces() {
            let faces = cycle_faces(&dcel, face);
            prop_assert!(faces.len() >= 3);
            prop_assert!(faces.iter().all(|&f| f == face.id));
        }
    }

    #[test]
    fn face_centroids_locate_to_their_face(seed in 0u64..10_000, rounds in 0usize..12) {
        let outline = random_outline(seed, 10);
        let mut dcel = Dcel::from_polygon(&outline).unwrap();
        split_randomly(&mut dcel, rounds, seed + 99).unwrap();
        for face in dcel.faces() {
            let verts = dcel.face_vertices(face.id).unwrap();
            let c = centroid(&verts);
            prop_assert_eq!(dcel.locate(c), Some(face.id));
        }
        let far = vector![1.0e4, -1.0e4];
        prop_assert_eq!(dcel.locate(far), None);
    }

    #[test]
    fn half_plane_sign_flips_across_the_pair(seed in 0u64..10_000, px in -150.0f64..150.0, py in -150.0f64..150.0) {
        let outline = random_outline(seed, 8);
        let mut dcel = Dcel::from_polygon(&outline).unwrap();
        split_randomly(&mut dcel, 4, seed + 5).unwrap();
        let p = vector![px, py];
        for e in dcel.half_edges() {
            let pair = dcel.half_edge(e.pair);
            let s = half_plane_sign(e.start, e.end, p);
            if s != 0 {
                prop_assert_eq!(s, -half_plane_sign(pair.start, pair.end, p));
            }
        }
    }
}
