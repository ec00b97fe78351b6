//! Square detection for four points of the integer lattice.
//!
//! Layout
//! - `point`: the `Point` value and its products, slopes, and right-angle tests.
//! - `validate`: five independent "is this a square" predicates and the
//!   `Strategy` enum that names them.
//! - `corpus`: labelled fixtures and the audit that cross-checks the
//!   strategies on every cyclic rotation.
//! - `sample`: reproducible random squares/near-squares and a sweep that
//!   tallies per-strategy disagreements.
//!
//! All predicates are pure functions; nothing here holds mutable state.

pub mod corpus;
pub mod point;
pub mod sample;
pub mod validate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use point::{squared_distance, ParsePointError, Point, Slope};
pub use validate::{
    classify_all, is_square, is_square_cross, is_square_dot, is_square_geeks_for_geeks,
    is_square_gradient, PointSet, Strategy, Verdicts,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::corpus::{audit, AuditError, BaselineReport};
    pub use crate::point::{Point, Slope};
    pub use crate::sample::{sweep, ReplayToken, SampleCfg, SweepTally};
    pub use crate::validate::{classify_all, PointSet, Strategy, Verdicts};
}
