//! Square classification for four integer points.
//!
//! Purpose
//! - Offer several independent "is this a square" predicates so they can be
//!   cross-checked against each other (`corpus::audit`, `sample::sweep`).
//! - Keep every predicate a pure free function: no scratch state, safe to call
//!   from any thread.
//!
//! Strategies
//! - `is_square`: distances only (reference).
//! - `is_square_gradient`: diagonal by distance, right angles by slope product.
//! - `is_square_dot`: diagonal by distance, right angles by dot product.
//! - `is_square_cross`: diagonal by cross-product symmetry.
//! - `is_square_geeks_for_geeks`: baseline with known false positives.
//!
//! References
//! - Code cross-refs: `point::{Point, Slope}`, `corpus::{audit, SQUARES, NOT_SQUARES}`

mod strategies;

pub use strategies::{
    distinct_points, is_square, is_square_cross, is_square_dot, is_square_geeks_for_geeks,
    is_square_gradient, pairwise_distances_from_first, PointSet, SideDistances,
};

use std::fmt;
use std::str::FromStr;

use crate::point::Point;

/// One of the five square predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Distance,
    Gradient,
    Dot,
    Cross,
    GeeksForGeeks,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Distance,
        Strategy::Gradient,
        Strategy::Dot,
        Strategy::Cross,
        Strategy::GeeksForGeeks,
    ];

    /// The predicates that must agree with the fixture labels, in audit order.
    pub const AUTHORITATIVE: [Strategy; 4] = [
        Strategy::Distance,
        Strategy::Cross,
        Strategy::Dot,
        Strategy::Gradient,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Distance => "distance",
            Strategy::Gradient => "gradient",
            Strategy::Dot => "dot",
            Strategy::Cross => "cross",
            Strategy::GeeksForGeeks => "geeks_for_geeks",
        }
    }

    /// Position in `ALL`; handy for per-strategy counters.
    pub fn index(&self) -> usize {
        match self {
            Strategy::Distance => 0,
            Strategy::Gradient => 1,
            Strategy::Dot => 2,
            Strategy::Cross => 3,
            Strategy::GeeksForGeeks => 4,
        }
    }

    #[inline]
    pub fn is_authoritative(&self) -> bool {
        !matches!(self, Strategy::GeeksForGeeks)
    }

    /// The predicate as a plain function pointer.
    pub fn predicate(&self) -> fn(Point, Point, Point, Point) -> bool {
        match self {
            Strategy::Distance => is_square,
            Strategy::Gradient => is_square_gradient,
            Strategy::Dot => is_square_dot,
            Strategy::Cross => is_square_cross,
            Strategy::GeeksForGeeks => is_square_geeks_for_geeks,
        }
    }

    #[inline]
    pub fn classify(&self, points: &PointSet) -> bool {
        let [p1, p2, p3, p4] = *points;
        (self.predicate())(p1, p2, p3, p4)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError {
    pub name: String,
}

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strategy {:?} (expected one of: ", self.name)?;
        for (k, s) in Strategy::ALL.iter().enumerate() {
            if k > 0 {
                f.write_str(", ")?;
            }
            f.write_str(s.name())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Strategy::ALL
            .into_iter()
            .find(|st| st.name() == key)
            .ok_or_else(|| ParseStrategyError {
                name: s.to_string(),
            })
    }
}

/// Result of every strategy on one point set, indexed like `Strategy::ALL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdicts {
    pub points: PointSet,
    pub results: [bool; 5],
}

impl Verdicts {
    #[inline]
    pub fn get(&self, strategy: Strategy) -> bool {
        self.results[strategy.index()]
    }

    /// All authoritative strategies return the same answer.
    pub fn authoritative_agree(&self) -> bool {
        let first = self.get(Strategy::AUTHORITATIVE[0]);
        Strategy::AUTHORITATIVE
            .iter()
            .all(|&s| self.get(s) == first)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Strategy, bool)> + '_ {
        Strategy::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

/// Run all five strategies on `points`.
pub fn classify_all(points: &PointSet) -> Verdicts {
    Verdicts {
        points: *points,
        results: Strategy::ALL.map(|s| s.classify(points)),
    }
}
