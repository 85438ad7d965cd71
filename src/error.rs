use thiserror::Error;

/// Errors produced while building or combining fuzzy sets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    /// A token in a textual value list is not a number.
    #[error("invalid value {token:?}: expected a number")]
    InvalidValue { token: String },

    /// A required list of values was empty.
    #[error("no values supplied")]
    EmptyInput,

    #[error("invalid universe: {reason}")]
    InvalidUniverse { reason: &'static str },

    /// Shape parameters that would produce an undefined membership curve.
    #[error("degenerate {shape} membership function: {reason}")]
    DegenerateShape { shape: &'static str, reason: &'static str },

    #[error("universe has {universe} points but membership has {membership}")]
    LengthMismatch { universe: usize, membership: usize },

    /// Binary operations require both operands to share one universe.
    #[error("incompatible universes: {left} points vs {right} points")]
    IncompatibleUniverses { left: usize, right: usize },

    #[error("cannot defuzzify: zero membership mass")]
    ZeroMembershipMass,

    /// No sample attains a comparable maximum, e.g. every degree is NaN.
    #[error("cannot defuzzify: membership has no maximum")]
    NoMaximum,

    #[error("lambda-cut at {alpha} is empty")]
    EmptyCut { alpha: f64 },

    #[error("unknown {kind} {name:?}")]
    UnknownMethod { kind: &'static str, name: String },
}

pub type Result<T> = std::result::Result<T, FuzzyError>;
