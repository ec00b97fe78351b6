//! The five square predicates and the distance helpers they share.
//!
//! Each predicate takes the four corners in any order and is total: duplicate
//! or collinear input yields `false`.

use std::collections::HashSet;

use crate::point::{squared_distance, Point};

/// Four candidate corners, in caller order.
pub type PointSet = [Point; 4];

/// Squared distances from the first point to the other three.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideDistances {
    pub d12: i128,
    pub d13: i128,
    pub d14: i128,
}

impl SideDistances {
    /// Smallest of the three; the squared side length if the set is a square.
    #[inline]
    pub fn area(&self) -> i128 {
        self.d12.min(self.d13).min(self.d14)
    }

    #[inline]
    pub fn sum(&self) -> i128 {
        self.d12 + self.d13 + self.d14
    }
}

/// No two points coincide.
pub fn distinct_points(points: &[Point]) -> bool {
    let mut seen = HashSet::with_capacity(points.len());
    points.iter().all(|p| seen.insert(*p))
}

/// `d12, d13, d14`, or `None` if any other point coincides with `p1`.
pub fn pairwise_distances_from_first(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
) -> Option<SideDistances> {
    let d = SideDistances {
        d12: squared_distance(p1, p2),
        d13: squared_distance(p1, p3),
        d14: squared_distance(p1, p4),
    };
    (d.d12 != 0 && d.d13 != 0 && d.d14 != 0).then_some(d)
}

/// Pick the diagonal through `p1`: the first of `d14, d13, d12` equal to
/// `2·area`. Returns `(far, side_a, side_b)`.
fn split_on_diagonal(
    d: SideDistances,
    p2: Point,
    p3: Point,
    p4: Point,
) -> Option<(Point, Point, Point)> {
    let diag = 2 * d.area();
    if d.d14 == diag {
        Some((p4, p2, p3))
    } else if d.d13 == diag {
        Some((p3, p2, p4))
    } else if d.d12 == diag {
        Some((p2, p3, p4))
    } else {
        None
    }
}

/// Reference strategy: distances only.
///
/// The three distances from `p1` must be `{a, a, 2a}`, which holds iff each
/// is a multiple of `a = min` and they sum to `4a`. The two side corners must
/// then sit at `a` from the far corner and at `2a` from each other.
pub fn is_square(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let Some(d) = pairwise_distances_from_first(p1, p2, p3, p4) else {
        return false;
    };
    let area = d.area();
    let multiples = [d.d12, d.d13, d.d14].iter().all(|&dk| dk % area == 0);
    if !multiples || d.sum() != 4 * area {
        return false;
    }
    let diag = 2 * area;
    let dist = squared_distance;
    if d.d12 == diag {
        return dist(p4, p3) == diag && dist(p3, p2) == area && dist(p4, p2) == area;
    }
    if d.d13 == diag {
        return dist(p4, p2) == diag && dist(p2, p3) == area && dist(p4, p3) == area;
    }
    if d.d14 == diag {
        return dist(p3, p2) == diag && dist(p2, p4) == area && dist(p3, p4) == area;
    }
    false
}

/// Diagonal by distance, right angles at the side corners by slope product.
pub fn is_square_gradient(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    if !distinct_points(&[p1, p2, p3, p4]) {
        return false;
    }
    let Some(d) = pairwise_distances_from_first(p1, p2, p3, p4) else {
        return false;
    };
    match split_on_diagonal(d, p2, p3, p4) {
        Some((far, a, b)) => {
            a.is_right_angle_gradient(p1, far) && b.is_right_angle_gradient(p1, far)
        }
        None => false,
    }
}

/// Diagonal by distance, right angles at both diagonal ends by dot product.
///
/// No separate distinctness check: a duplicate of `p1` fails the distance
/// step, and the remaining duplicates fail one of the dot products.
pub fn is_square_dot(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let Some(d) = pairwise_distances_from_first(p1, p2, p3, p4) else {
        return false;
    };
    match split_on_diagonal(d, p2, p3, p4) {
        Some((far, a, b)) => p1.is_right_angle_dot(a, b) && far.is_right_angle_dot(a, b),
        None => false,
    }
}

/// Diagonal by symmetry of cross products, then right angles and equal sides.
///
/// `p1–X` is taken as the diagonal when the other two corners `Y, Z` satisfy
/// `cross(p1, X, Y) == −cross(p1, X, Z)`, i.e. they lie at equal distance on
/// opposite sides of the line. The first candidate that matches decides.
pub fn is_square_cross(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    if !distinct_points(&[p1, p2, p3, p4]) {
        return false;
    }
    for (far, a, b) in [(p2, p3, p4), (p3, p2, p4), (p4, p2, p3)] {
        if p1.cross_prod(far, a) == -p1.cross_prod(far, b) {
            return a.is_right_angle_dot(p1, far)
                && b.is_right_angle_dot(p1, far)
                && a.equal_distances(p1, far);
        }
    }
    false
}

/// Widely circulated distance-pattern check, kept as a baseline.
///
/// It only inspects distances from `p1` plus one cross distance per case, so
/// it accepts some non-squares (e.g. kites and rhombi with a matching
/// pattern). Measured by `corpus::audit`, never relied on.
pub fn is_square_geeks_for_geeks(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    let dist = squared_distance;
    let d2 = dist(p1, p2);
    let d3 = dist(p1, p3);
    let d4 = dist(p1, p4);
    if d2 == 0 || d3 == 0 || d4 == 0 {
        return false;
    }
    // (p1,p2) and (p1,p3) sides, (p1,p4) diagonal.
    if d2 == d3 && 2 * d2 == d4 && 2 * dist(p2, p4) == dist(p2, p3) {
        return true;
    }
    if d3 == d4 && 2 * d3 == d2 && 2 * dist(p3, p2) == dist(p3, p4) {
        return true;
    }
    if d2 == d4 && 2 * d2 == d3 && 2 * dist(p2, p3) == dist(p2, p4) {
        return true;
    }
    false
}
