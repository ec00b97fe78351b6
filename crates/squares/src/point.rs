//! Integer points in the plane and the small predicates built on them.
//!
//! Purpose
//! - Provide the `Point` value used by every square strategy, plus the
//!   vector products (dot, cross), squared distances, and both flavours of
//!   right-angle test (dot product and slope product).
//!
//! Numerics
//! - Coordinates are `i32`; every derived quantity is computed in `i128`, so
//!   products of two squared distances between arbitrary `i32` points stay exact.
//! - Slopes are kept as reduced integer ratios (`Slope`). A vertical segment is
//!   its own variant instead of a float sentinel, and the "slope product is −1"
//!   test is an exact integer identity.
//!
//! References
//! - Code cross-refs: `validate::{is_square_gradient, is_square_dot, is_square_cross}`

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use nalgebra::Vector2;

/// Squared Euclidean distance `(a.x−b.x)² + (a.y−b.y)²`.
#[inline]
pub fn squared_distance(a: Point, b: Point) -> i128 {
    let d = a.offset(b);
    d.dot(&d)
}

/// A point with integer coordinates. Identity is the coordinate pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Displacement `p − self`.
    #[inline]
    pub fn offset(&self, p: Point) -> Vector2<i128> {
        Vector2::new(
            i128::from(p.x) - i128::from(self.x),
            i128::from(p.y) - i128::from(self.y),
        )
    }

    /// Float view for callers working with the nalgebra `f64` types.
    #[inline]
    pub fn to_vec2(&self) -> Vector2<f64> {
        Vector2::new(f64::from(self.x), f64::from(self.y))
    }

    #[inline]
    pub fn squared_distance(&self, p: Point) -> i128 {
        squared_distance(*self, p)
    }

    /// Cross product of `(p1 − self)` and `(p2 − self)`.
    ///
    /// Positive when `p2` lies counterclockwise of `p1` as seen from `self`,
    /// zero when the three points are collinear.
    #[inline]
    pub fn cross_prod(&self, p1: Point, p2: Point) -> i128 {
        let a = self.offset(p1);
        let b = self.offset(p2);
        a.x * b.y - a.y * b.x
    }

    /// Dot product of `(p1 − self)` and `(p2 − self)`.
    #[inline]
    pub fn dot_prod(&self, p1: Point, p2: Point) -> i128 {
        self.offset(p1).dot(&self.offset(p2))
    }

    /// Right angle at `self` between `p1` and `p2`, by dot product.
    ///
    /// A coincident endpoint gives a zero vector and therefore also reports
    /// `true`; callers that care reject duplicates first.
    #[inline]
    pub fn is_right_angle_dot(&self, p1: Point, p2: Point) -> bool {
        self.dot_prod(p1, p2) == 0
    }

    /// Slope of the line through `self` and `p`.
    pub fn gradient(&self, p: Point) -> Slope {
        let run = i128::from(self.x) - i128::from(p.x);
        let rise = i128::from(self.y) - i128::from(p.y);
        Slope::from_rise_run(rise, run)
    }

    /// Right angle at `self` between `p1` and `p2`, by slope product.
    pub fn is_right_angle_gradient(&self, p1: Point, p2: Point) -> bool {
        self.gradient(p1).is_perpendicular_to(&self.gradient(p2))
    }

    /// `self` is equally far from `p1` and `p2`.
    #[inline]
    pub fn equal_distances(&self, p1: Point, p2: Point) -> bool {
        self.squared_distance(p1) == self.squared_distance(p2)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error returned when text is not of the form `x,y` (parentheses optional).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsePointError {
    /// Not exactly two comma-separated fields.
    Shape { input: String },
    /// A field is not an `i32`.
    Coord { input: String, source: ParseIntError },
}

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { input } => write!(f, "expected `x,y`, got {input:?}"),
            Self::Coord { input, source } => {
                write!(f, "bad coordinate in {input:?}: {source}")
            }
        }
    }
}

impl std::error::Error for ParsePointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shape { .. } => None,
            Self::Coord { source, .. } => Some(source),
        }
    }
}

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(trimmed);
        let mut fields = inner.split(',');
        let (Some(xs), Some(ys), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(ParsePointError::Shape { input: s.to_string() });
        };
        let coord = |field: &str| {
            field
                .trim()
                .parse::<i32>()
                .map_err(|source| ParsePointError::Coord {
                    input: s.to_string(),
                    source,
                })
        };
        Ok(Point::new(coord(xs)?, coord(ys)?))
    }
}

/// Slope of a segment.
///
/// Invariants:
/// - `Finite` ratios are in lowest terms with `run > 0`, so equal slopes
///   compare equal.
/// - A segment between coincident points has no direction; it is reported as
///   `Finite { rise: 0, run: 1 }`, matching a zero-length horizontal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slope {
    /// Undefined slope (`Δx = 0`, `Δy ≠ 0`).
    Vertical,
    /// `rise / run`.
    Finite { rise: i128, run: i128 },
}

impl Slope {
    fn from_rise_run(rise: i128, run: i128) -> Self {
        if run == 0 {
            return if rise == 0 {
                Slope::Finite { rise: 0, run: 1 }
            } else {
                Slope::Vertical
            };
        }
        let g = gcd(rise, run);
        let sign = run.signum();
        Slope::Finite {
            rise: sign * rise / g,
            run: sign * run / g,
        }
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Slope::Finite { rise: 0, .. })
    }

    /// Real-valued gradient; `None` for a vertical segment.
    pub fn value(&self) -> Option<f64> {
        match *self {
            Slope::Vertical => None,
            Slope::Finite { rise, run } => Some(rise as f64 / run as f64),
        }
    }

    /// Slope product equals −1, or one side horizontal and the other vertical.
    pub fn is_perpendicular_to(&self, other: &Slope) -> bool {
        if self.is_horizontal() {
            return *other == Slope::Vertical;
        }
        if other.is_horizontal() {
            return *self == Slope::Vertical;
        }
        match (*self, *other) {
            (Slope::Finite { rise: ra, run: na }, Slope::Finite { rise: rb, run: nb }) => {
                ra * rb == -(na * nb)
            }
            _ => false,
        }
    }
}

fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn products_against_hand_values() {
        let o = p(1, 1);
        // (3,0) and (0,2) relative to o
        assert_eq!(o.cross_prod(p(4, 1), p(1, 3)), 6);
        assert_eq!(o.cross_prod(p(1, 3), p(4, 1)), -6);
        assert_eq!(o.dot_prod(p(4, 1), p(1, 3)), 0);
        assert_eq!(o.dot_prod(p(4, 1), p(3, 2)), 6);
        assert!(o.is_right_angle_dot(p(4, 1), p(1, 3)));
        assert!(!o.is_right_angle_dot(p(4, 1), p(3, 2)));
    }

    #[test]
    fn collinear_points_have_zero_cross() {
        assert_eq!(p(0, 0).cross_prod(p(2, 2), p(5, 5)), 0);
        assert_eq!(p(0, 0).cross_prod(p(2, 2), p(-3, -3)), 0);
    }

    #[test]
    fn gradient_variants() {
        assert_eq!(p(0, 0).gradient(p(0, 5)), Slope::Vertical);
        assert_eq!(p(0, 0).gradient(p(4, 0)), Slope::Finite { rise: 0, run: 1 });
        // Reduced and sign-normalised regardless of direction.
        assert_eq!(p(0, 0).gradient(p(4, 2)), Slope::Finite { rise: 1, run: 2 });
        assert_eq!(p(4, 2).gradient(p(0, 0)), Slope::Finite { rise: 1, run: 2 });
        assert_eq!(p(0, 0).gradient(p(-3, 6)), Slope::Finite { rise: -2, run: 1 });
        assert_eq!(p(0, 0).gradient(p(0, 5)).value(), None);
        assert_eq!(p(0, 0).gradient(p(4, 2)).value(), Some(0.5));
    }

    #[test]
    fn gradient_right_angles() {
        // Axis aligned: horizontal needs vertical.
        assert!(p(0, 0).is_right_angle_gradient(p(3, 0), p(0, 7)));
        assert!(p(0, 0).is_right_angle_gradient(p(0, 7), p(3, 0)));
        assert!(!p(0, 0).is_right_angle_gradient(p(3, 0), p(-3, 0)));
        assert!(!p(0, 0).is_right_angle_gradient(p(0, 3), p(0, -3)));
        // Tilted: slopes 1/3 and −3.
        assert!(p(1, 0).is_right_angle_gradient(p(4, 1), p(0, 3)));
        // Slopes 11/3 and −3/11, whose f64 product is not exactly −1.
        assert!(p(0, 0).is_right_angle_gradient(p(3, 11), p(-11, 3)));
        assert!(!p(0, 0).is_right_angle_gradient(p(1, 1), p(2, 1)));
    }

    #[test]
    fn right_angle_tests_agree_on_distinct_points() {
        let o = p(2, -1);
        let ring = [p(5, 3), p(-2, 2), p(2, 6), p(9, -1), p(-1, -5), p(6, -4)];
        for &a in &ring {
            for &b in &ring {
                assert_eq!(
                    o.is_right_angle_dot(a, b),
                    o.is_right_angle_gradient(a, b),
                    "{a} {b}"
                );
            }
        }
    }

    #[test]
    fn equal_distances_and_extremes() {
        assert!(p(0, 0).equal_distances(p(3, 4), p(5, 0)));
        assert!(!p(0, 0).equal_distances(p(3, 4), p(4, 4)));
        let lo = p(i32::MIN, i32::MIN);
        let hi = p(i32::MAX, i32::MAX);
        let span = i128::from(i32::MAX) - i128::from(i32::MIN);
        assert_eq!(lo.squared_distance(hi), 2 * span * span);
        assert_eq!(hi.to_vec2().x, f64::from(i32::MAX));
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("3,-4".parse::<Point>().unwrap(), p(3, -4));
        assert_eq!(" ( 3 , -4 ) ".parse::<Point>().unwrap(), p(3, -4));
        assert_eq!(p(3, -4).to_string(), "(3, -4)");
        assert!(matches!(
            "3".parse::<Point>(),
            Err(ParsePointError::Shape { .. })
        ));
        assert!(matches!(
            "1,2,3".parse::<Point>(),
            Err(ParsePointError::Shape { .. })
        ));
        assert!(matches!(
            "1,y".parse::<Point>(),
            Err(ParsePointError::Coord { .. })
        ));
    }
}
