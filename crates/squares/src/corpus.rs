//! Fixture corpus and the audit that cross-checks the strategies on it.
//!
//! Model
//! - `SQUARES` and `NOT_SQUARES` are hand-picked 4-point sets: axis-aligned
//!   and tilted squares, rectangles, rhombi, kites, collinear runs, and sets
//!   with coincident points.
//! - Every fixture is checked in all four cyclic rotations of its corners.
//! - The authoritative strategies must match the label; a mismatch is an
//!   `AuditError`. The baseline strategy is only tallied (`BaselineReport`).

use std::fmt;

use crate::point::Point;
use crate::validate::{PointSet, Strategy};

type Raw = [(i32, i32); 4];

/// Sets that are squares in every corner order.
pub const SQUARES: [Raw; 9] = [
    [(20, 10), (10, 20), (20, 20), (10, 10)],
    [(1, 0), (4, 1), (3, 4), (0, 3)],
    [(0, 0), (3, 1), (2, 4), (-1, 3)],
    [(0, 0), (1, 0), (1, 1), (0, 1)],
    [(0, -1), (3, 0), (2, 3), (-1, 2)],
    [(3, 0), (5, 2), (3, 4), (1, 2)],
    [(0, 0), (2, 0), (2, 2), (0, 2)],
    [(0, 0), (2, 1), (3, -1), (1, -2)],
    [(0, -2), (2, 0), (0, 2), (-2, 0)],
];

/// Sets that are not squares, including degenerate ones.
pub const NOT_SQUARES: [Raw; 33] = [
    [(20, 10), (10, 20), (20, 20), (30, 10)],
    [(20, 10), (10, 20), (20, 20), (-10, 10)],
    [(20, 10), (20, 10), (20, 10), (20, 10)],
    [(3, 0), (0, 0), (6, -3), (0, 3)],
    [(3, 0), (3, 3), (0, 6), (0, 3)],
    [(3, 0), (3, 3), (3, 6), (0, 3)],
    [(3, 0), (3, 3), (6, 6), (6, 3)],
    [(-3, 6), (3, 3), (0, 0), (0, 3)],
    [(3, 0), (-3, -3), (0, 0), (0, 3)],
    [(3, 0), (3, 3), (6, 6), (0, 3)],
    [(3, 0), (5, 2), (-1, 0), (1, 2)],
    [(3, 0), (3, 0), (5, 2), (1, 2)],
    [(3, 0), (5, 2), (3, 0), (1, 2)],
    [(3, 0), (5, 2), (1, 2), (3, 0)],
    [(1, 0), (0, 1), (0, 0), (0, 0)],
    [(3, 0), (5, 2), (5, 2), (1, 2)],
    [(3, 0), (5, 2), (1, 2), (5, 2)],
    [(3, 0), (1, 2), (5, 2), (5, 2)],
    [(0, 0), (0, 0), (0, 0), (0, 0)],
    [(3, -1), (5, 2), (3, 4), (1, 2)],
    [(3, -1), (5, 2), (3, 5), (1, 2)],
    [(3, 0), (6, 2), (3, 4), (0, 2)],
    [(0, 0), (2, 0), (2, 1), (0, 1)],
    [(0, 2), (2, 1), (2, 3), (0, 4)],
    [(-1, 0), (2, 0), (2, 1), (-1, 1)],
    [(0, -2), (2, 2), (0, 2), (-3, 1)],
    [(1, 1), (4, 1), (3, 4), (0, 3)],
    [(0, 0), (-3, 1), (2, 4), (-1, 3)],
    [(0, 0), (1, 0), (1, 1), (1, 1)],
    [(0, -1), (3, 0), (2, 3), (1, 2)],
    [(3, 0), (3, 2), (3, 4), (1, 2)],
    [(0, 0), (3, 0), (2, 2), (0, 2)],
    [(0, -2), (2, 0), (0, 2), (-2, 1)],
];

#[inline]
pub fn point_set(raw: Raw) -> PointSet {
    raw.map(Point::from)
}

/// The four cyclic rotations of `points`, starting with the identity.
pub fn rotations(points: PointSet) -> impl Iterator<Item = PointSet> {
    (0..points.len()).map(move |k| {
        let mut rotated = points;
        rotated.rotate_left(k);
        rotated
    })
}

/// A labelled point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fixture {
    /// Position within its source list.
    pub index: usize,
    pub is_square: bool,
    pub points: PointSet,
}

/// All fixtures: squares first, then non-squares.
pub fn fixtures() -> impl Iterator<Item = Fixture> {
    let squares = SQUARES.into_iter().enumerate().map(|(index, raw)| Fixture {
        index,
        is_square: true,
        points: point_set(raw),
    });
    let others = NOT_SQUARES.into_iter().enumerate().map(|(index, raw)| Fixture {
        index,
        is_square: false,
        points: point_set(raw),
    });
    squares.chain(others)
}

/// Baseline mistakes over every rotation of every fixture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BaselineReport {
    /// Non-square rotations the baseline accepted.
    pub false_positives: usize,
    /// Square rotations the baseline rejected.
    pub false_negatives: usize,
    /// Number of (fixture, rotation) cases checked.
    pub cases: usize,
}

/// An authoritative strategy disagreed with a fixture label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    Disagreement {
        strategy: Strategy,
        fixture: Fixture,
        rotation: usize,
        points: PointSet,
    },
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::Disagreement {
                strategy,
                fixture,
                rotation,
                points,
            } => {
                let kind = if fixture.is_square { "square" } else { "non-square" };
                write!(
                    f,
                    "strategy `{strategy}` misclassified {kind} fixture #{} (rotation {rotation}):",
                    fixture.index
                )?;
                for p in points {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for AuditError {}

/// Audit the built-in corpus.
pub fn audit() -> Result<BaselineReport, AuditError> {
    audit_fixtures(fixtures())
}

/// Check every rotation of every fixture; stop at the first authoritative
/// mismatch, otherwise report the baseline's false positives/negatives.
pub fn audit_fixtures<I>(fixtures: I) -> Result<BaselineReport, AuditError>
where
    I: IntoIterator<Item = Fixture>,
{
    let mut report = BaselineReport::default();
    for fixture in fixtures {
        for (rotation, points) in rotations(fixture.points).enumerate() {
            for strategy in Strategy::AUTHORITATIVE {
                if strategy.classify(&points) != fixture.is_square {
                    return Err(AuditError::Disagreement {
                        strategy,
                        fixture,
                        rotation,
                        points,
                    });
                }
            }
            let baseline = Strategy::GeeksForGeeks.classify(&points);
            match (fixture.is_square, baseline) {
                (true, false) => report.false_negatives += 1,
                (false, true) => report.false_positives += 1,
                _ => {}
            }
            report.cases += 1;
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::classify_all;

    #[test]
    fn rotations_are_cyclic() {
        let ps = point_set([(0, 0), (1, 0), (1, 1), (0, 1)]);
        let all: Vec<PointSet> = rotations(ps).collect();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], ps);
        assert_eq!(all[1], point_set([(1, 0), (1, 1), (0, 1), (0, 0)]));
        assert_eq!(all[3], point_set([(0, 1), (0, 0), (1, 0), (1, 1)]));
    }

    #[test]
    fn squares_accepted_in_every_rotation() {
        for (k, raw) in SQUARES.iter().enumerate() {
            for (r, ps) in rotations(point_set(*raw)).enumerate() {
                for s in Strategy::AUTHORITATIVE {
                    assert!(s.classify(&ps), "{s} rejected square #{k} rotation {r}");
                }
            }
        }
    }

    #[test]
    fn non_squares_rejected_in_every_rotation() {
        for (k, raw) in NOT_SQUARES.iter().enumerate() {
            for (r, ps) in rotations(point_set(*raw)).enumerate() {
                for s in Strategy::AUTHORITATIVE {
                    assert!(!s.classify(&ps), "{s} accepted non-square #{k} rotation {r}");
                }
            }
        }
    }

    #[test]
    fn audit_reproduces_baseline_counts() {
        let report = audit().expect("authoritative strategies agree with the corpus");
        assert_eq!(report.false_positives, 7);
        assert_eq!(report.false_negatives, 0);
        assert_eq!(report.cases, 4 * (SQUARES.len() + NOT_SQUARES.len()));
    }

    #[test]
    fn baseline_false_positives_are_the_known_rotations() {
        // (non-square index, rotation) pairs the baseline accepts.
        let mut hits = Vec::new();
        for (k, raw) in NOT_SQUARES.iter().enumerate() {
            for (r, ps) in rotations(point_set(*raw)).enumerate() {
                if classify_all(&ps).get(Strategy::GeeksForGeeks) {
                    hits.push((k, r));
                }
            }
        }
        assert_eq!(
            hits,
            vec![(0, 0), (0, 2), (4, 1), (4, 3), (6, 1), (6, 3), (10, 3)]
        );
    }

    #[test]
    fn audit_flags_mislabelled_fixture() {
        let wrong = Fixture {
            index: 99,
            is_square: true,
            points: point_set([(0, 0), (2, 0), (2, 1), (0, 1)]),
        };
        let err = audit_fixtures([wrong]).unwrap_err();
        let AuditError::Disagreement {
            strategy,
            fixture,
            rotation,
            ..
        } = &err;
        assert_eq!(*strategy, Strategy::Distance);
        assert_eq!(fixture.index, 99);
        assert_eq!(*rotation, 0);
        assert!(err.to_string().contains("square fixture #99"));
    }

    #[test]
    fn empty_corpus_gives_empty_report() {
        assert_eq!(
            audit_fixtures(std::iter::empty()).unwrap(),
            BaselineReport::default()
        );
    }
}
