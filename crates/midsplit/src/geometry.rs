//! Plane geometry primitives used by the DCEL and the point locator.
//!
//! Conventions
//! - Coordinates and displacement vectors are both `Vector2<f64>`.
//! - Bounded faces are oriented clockwise, so the interior of a directed
//!   boundary edge is on its right-hand side. `half_plane_sign` is the only
//!   predicate the locator uses and it is exact (no epsilon).

use nalgebra::{Matrix2, Vector2};

/// A point in the plane.
pub type Coord = Vector2<f64>;

/// Displacement `B - A`.
#[inline]
pub fn vector(a: Coord, b: Coord) -> Vector2<f64> {
    Vector2::new(b.x - a.x, b.y - a.y)
}

#[inline]
pub fn dot(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.dot(&v)
}

#[inline]
pub fn midpoint(p: Coord, q: Coord) -> Coord {
    Vector2::new((p.x + q.x) / 2.0, (p.y + q.y) / 2.0)
}

/// Pre: `a` and `b` are 2D column vectors.
/// Post: returns the signed area of the parallelogram spanned by (a,b).
pub fn parallelogram_area(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    // determinant of [a b]
    let m = Matrix2::from_columns(&[a, b]);
    m.determinant()
}

/// Shoelace area of a closed outline. Positive for counter-clockwise order,
/// negative for clockwise.
pub fn signed_area(outline: &[Coord]) -> f64 {
    let n = outline.len();
    let twice: f64 = (0..n)
        .map(|i| parallelogram_area(outline[i], outline[(i + 1) % n]))
        .sum();
    twice / 2.0
}

/// Which side of the directed segment `start → end` the point lies on.
///
/// Rotates `u = end - start` by 90° clockwise to `u' = (u.y, -u.x)` and
/// returns the sign of `<u', point - start>`:
/// `1` strictly on the right (interior of a clockwise loop), `0` on the
/// supporting line, `-1` on the left.
pub fn half_plane_sign(start: Coord, end: Coord, point: Coord) -> i32 {
    let u = vector(start, end);
    let v = vector(start, point);
    let u_perp = Vector2::new(u.y, -u.x);
    let dp = dot(u_perp, v);
    if dp > 0.0 {
        1
    } else if dp == 0.0 {
        0
    } else {
        -1
    }
}
