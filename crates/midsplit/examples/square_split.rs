//! Cut a square into three faces and show where a few points land.
//!
//! Usage:
//!   cargo run -p midsplit --example square_split
//!
//! Prints each face boundary, then the face found for each sample point
//! (`none` for points outside the square or on a chord).

use midsplit::prelude::*;

fn main() -> Result<(), DcelError> {
    let square = [
        Coord::new(0.0, 0.0),
        Coord::new(10.0, 0.0),
        Coord::new(10.0, 10.0),
        Coord::new(0.0, 10.0),
    ];
    let mut dcel = Dcel::from_polygon(&square)?;
    // bottom against top, then the new chord against the left side
    for (a, b) in [(0, 2), (4, 3)] {
        let face = dcel.split(a, b)?;
        println!("split {a} {b} -> face {face}");
    }
    for face in dcel.faces() {
        let verts = dcel.face_vertices(face.id).unwrap_or_default();
        let pts: Vec<String> = verts.iter().map(|p| format!("({}, {})", p.x, p.y)).collect();
        println!("face {}: {}", face.id, pts.join(" -> "));
    }
    let samples = [
        Coord::new(8.0, 5.0),
        Coord::new(4.0, 9.0),
        Coord::new(1.0, 2.0),
        Coord::new(5.0, 3.0),
        Coord::new(12.0, 1.0),
    ];
    for p in samples {
        match dcel.locate(p) {
            Some(face) => println!("({}, {}) -> face {face}", p.x, p.y),
            None => println!("({}, {}) -> none", p.x, p.y),
        }
    }
    Ok(())
}
