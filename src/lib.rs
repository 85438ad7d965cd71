//! Fuzzy sets over a discretized universe of discourse.
//!
//! A [`FuzzySet`] pairs a sampled [`Universe`] with one membership degree per
//! sample. Sets are built from parametric [`MembershipShape`]s or from
//! hand-entered values, combined pointwise with [`SetOp`]s and
//! [`Implication`]s, and reduced to crisp values with a [`Defuzzification`]
//! method.
//!
//! ```
//! use fuzzy_toolbox::{FuzzySet, Universe};
//!
//! let universe = Universe::linspace(0., 10., 200)?;
//! let warm = FuzzySet::triangular(&universe, 2., 5., 8.)?;
//! let hot = FuzzySet::sigmoid(&universe, 2., 7.)?;
//!
//! let either = warm.union(&hot)?;
//! let crisp = either.centroid()?;
//!
//! assert!(crisp > 5. && crisp < 10.);
//! # Ok::<(), fuzzy_toolbox::FuzzyError>(())
//! ```
//!
//! Binary operations never resample: both operands must share one universe,
//! otherwise [`FuzzyError::IncompatibleUniverses`] is returned.

mod defuzz;
mod error;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod registry;
mod set;
mod universe;

pub use defuzz::{Defuzzification, Reduction, DEFAULT_ALPHA};
pub use error::{FuzzyError, Result};
pub use inputs::parse_values;
pub use linspace::Linspace;
pub use math::{all_close, is_close, ATOL, RTOL};
pub use membership::MembershipShape;
pub use ops::{Implication, SetOp};
pub use registry::{FuzzySets, SetKey};
pub use set::FuzzySet;
pub use universe::{Universe, UniverseConfig};
