//! Reduction of a membership curve to a crisp value.
//!
//! Every method works on plain discrete sums over the sampled universe, so
//! precision is bounded by the universe's resolution.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use num::Float;

use crate::error::{FuzzyError, Result};
use crate::ops::normalize_name;

/// Default threshold of [`Defuzzification::LambdaCut`].
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Method for defuzzificating a membership function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Defuzzification {
    /// Center of gravity, `Σ(x·μ) / Σμ`
    Centroid,
    /// Smallest sample where the cumulative membership reaches half the total
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
    /// Mean of the samples whose membership is at least `alpha`
    LambdaCut { alpha: f64 },
    /// Same formula as [`Defuzzification::Centroid`]
    WeightedAverage,
    /// Every sample weighted equally by the peak height
    HeightMethod,
    /// Center of sums over a single set.
    ///
    /// The textbook method sums several output sets without removing their
    /// overlap. With only one set that sum is the set itself, so this is the
    /// centroid.
    CenterOfSums,
    /// Same formula as [`Defuzzification::Centroid`]
    CenterOfArea,
}

impl Defuzzification {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Centroid => "centroid",
            Self::Bisector => "bisector",
            Self::MeanOfMaximum => "mean_of_maximum",
            Self::SmallestOfMaximum => "smallest_of_maximum",
            Self::LargestOfMaximum => "largest_of_maximum",
            Self::LambdaCut { .. } => "lambda_cut",
            Self::WeightedAverage => "weighted_average",
            Self::HeightMethod => "height_method",
            Self::CenterOfSums => "center_of_sums",
            Self::CenterOfArea => "center_of_area",
        }
    }

    pub fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> Result<F> {
        debug_assert_eq!(universe.len(), membership.len());

        let result = match self {
            Self::Centroid | Self::WeightedAverage | Self::CenterOfSums | Self::CenterOfArea => {
                centroid(universe, membership)
            },
            Self::Bisector => bisector(universe, membership),
            Self::MeanOfMaximum => maximizers(universe, membership).and_then(|xs| {
                Reduction::Mean.reduce(&xs).ok_or(FuzzyError::NoMaximum)
            }),
            Self::SmallestOfMaximum => maximizers(universe, membership).and_then(|xs| {
                Reduction::Min.reduce(&xs).ok_or(FuzzyError::NoMaximum)
            }),
            Self::LargestOfMaximum => maximizers(universe, membership).and_then(|xs| {
                Reduction::Max.reduce(&xs).ok_or(FuzzyError::NoMaximum)
            }),
            Self::LambdaCut { alpha } => {
                // A threshold F cannot represent cuts nothing.
                let threshold = F::from(alpha).unwrap_or_else(F::nan);

                Reduction::Mean
                    .reduce(&lambda_cut(universe, membership, threshold))
                    .ok_or(FuzzyError::EmptyCut { alpha })
            },
            Self::HeightMethod => height_method(universe, membership),
        };

        match &result {
            Ok(value) => {
                let value = value.to_f64().unwrap_or(f64::NAN);
                tracing::debug!(method = self.name(), value, "defuzzified")
            },
            Err(err) => tracing::debug!(method = self.name(), %err, "defuzzification failed"),
        }

        result
    }
}

impl fmt::Display for Defuzzification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LambdaCut { alpha } => write!(f, "lambda_cut({alpha})"),
            method => f.write_str(method.name()),
        }
    }
}

impl FromStr for Defuzzification {
    type Err = FuzzyError;

    /// Parses method names such as `"Mean of Maximum"` or `"Lambda-cut"`.
    /// A lambda-cut parsed by name uses [`DEFAULT_ALPHA`].
    fn from_str(s: &str) -> Result<Self> {
        let method = match &*normalize_name(s) {
            "centroid" => Self::Centroid,
            "bisector" => Self::Bisector,
            "mean_of_maximum" | "mom" => Self::MeanOfMaximum,
            "smallest_of_maximum" | "som" => Self::SmallestOfMaximum,
            "largest_of_maximum" | "lom" => Self::LargestOfMaximum,
            "lambda_cut" | "alpha_cut" => Self::LambdaCut { alpha: DEFAULT_ALPHA },
            "weighted_average" => Self::WeightedAverage,
            "height_method" | "height" => Self::HeightMethod,
            "center_of_sums" => Self::CenterOfSums,
            "center_of_area" | "coa" => Self::CenterOfArea,
            _ => {
                return Err(FuzzyError::UnknownMethod {
                    kind: "defuzzification method",
                    name: s.to_owned(),
                })
            },
        };

        Ok(method)
    }
}

/// How a subset of the universe is collapsed into one crisp value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Reduction {
    #[default]
    Mean,
    Min,
    Max,
}

impl Reduction {
    /// `None` for an empty subset.
    pub fn reduce<F: Float + Sum>(self, values: &[F]) -> Option<F> {
        if values.is_empty() {
            return None;
        }

        let reduced = match self {
            Self::Mean => values.iter().copied().sum::<F>() / F::from(values.len())?,
            Self::Min => values.iter().copied().fold(F::infinity(), F::min),
            Self::Max => values.iter().copied().fold(F::neg_infinity(), F::max),
        };

        Some(reduced)
    }
}

pub(crate) fn centroid<F: Float + Sum>(universe: &[F], membership: &[F]) -> Result<F> {
    let den = membership.iter().copied().sum::<F>();

    if den == F::zero() {
        return Err(FuzzyError::ZeroMembershipMass);
    }

    let num = universe
        .iter()
        .zip(membership)
        .map(|(&x, &m)| x * m)
        .sum::<F>();

    Ok(num / den)
}

pub(crate) fn bisector<F: Float + Sum>(universe: &[F], membership: &[F]) -> Result<F> {
    let area = membership.iter().copied().sum::<F>();

    if area == F::zero() {
        return Err(FuzzyError::ZeroMembershipMass);
    }

    let target = area / (F::one() + F::one());
    let mut cum_area = F::zero();

    for (&x, &m) in universe.iter().zip(membership) {
        cum_area = cum_area + m;
        if cum_area >= target {
            return Ok(x);
        }
    }

    // Only reachable when rounding keeps the running sum just under the target.
    universe.last().copied().ok_or(FuzzyError::ZeroMembershipMass)
}

pub(crate) fn peak<F: Float>(membership: &[F]) -> Option<F> {
    membership
        .iter()
        .copied()
        .filter(|m| !m.is_nan())
        .reduce(F::max)
}

/// Universe points attaining the global maximum membership.
pub(crate) fn maximizers<F: Float>(universe: &[F], membership: &[F]) -> Result<Vec<F>> {
    let maximum = peak(membership).ok_or(FuzzyError::NoMaximum)?;

    Ok(universe
        .iter()
        .zip(membership)
        .filter_map(|(&x, &m)| if m == maximum { Some(x) } else { None })
        .collect())
}

pub(crate) fn lambda_cut<F: Float>(universe: &[F], membership: &[F], alpha: F) -> Vec<F> {
    universe
        .iter()
        .zip(membership)
        .filter_map(|(&x, &m)| if m >= alpha { Some(x) } else { None })
        .collect()
}

pub(crate) fn height_method<F: Float + Sum>(universe: &[F], membership: &[F]) -> Result<F> {
    let height = match peak(membership) {
        Some(h) if h != F::zero() => h,
        _ => return Err(FuzzyError::ZeroMembershipMass),
    };
    let n = F::from(universe.len()).ok_or(FuzzyError::ZeroMembershipMass)?;
    let num = universe.iter().map(|&x| x * height).sum::<F>();

    Ok(num / (n * height))
}

#[test]
fn test_centroid_family() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0., 0.5, 1., 0.5, 0.];

    for method in [
        Defuzzification::Centroid,
        Defuzzification::WeightedAverage,
        Defuzzification::CenterOfSums,
        Defuzzification::CenterOfArea,
    ] {
        assert_eq!(method.call(&universe, &membership), Ok(2.));
    }

    assert_eq!(
        Defuzzification::Centroid.call(&universe, &[0.; 5]),
        Err(FuzzyError::ZeroMembershipMass)
    );
}

#[test]
fn test_bisector() {
    let universe = [0., 1., 2., 3., 4.];

    assert_eq!(bisector(&universe, &[0., 1., 1., 1., 0.]), Ok(2.));
    assert_eq!(bisector(&universe, &[1., 0., 0., 0., 0.]), Ok(0.));
    assert_eq!(bisector(&universe, &[0., 0., 0., 0., 1.]), Ok(4.));
    assert_eq!(bisector(&universe, &[0.; 5]), Err(FuzzyError::ZeroMembershipMass));
}

#[test]
fn test_maximum_methods() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0.2, 0.9, 0.9, 0.9, 0.1];

    assert_eq!(Defuzzification::MeanOfMaximum.call(&universe, &membership), Ok(2.));
    assert_eq!(Defuzzification::SmallestOfMaximum.call(&universe, &membership), Ok(1.));
    assert_eq!(Defuzzification::LargestOfMaximum.call(&universe, &membership), Ok(3.));

    // A flat zero curve is maximal everywhere.
    assert_eq!(Defuzzification::MeanOfMaximum.call(&universe, &[0.; 5]), Ok(2.));
    assert_eq!(
        Defuzzification::MeanOfMaximum.call(&universe, &[f64::NAN; 5]),
        Err(FuzzyError::NoMaximum)
    );
}

#[test]
fn test_lambda_cut() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0.2, 0.6, 1., 0.5, 0.1];

    assert_eq!(lambda_cut(&universe, &membership, 0.5), vec![1., 2., 3.]);
    assert_eq!(lambda_cut(&universe, &membership, 1.), vec![2.]);
    assert_eq!(lambda_cut(&universe, &membership, 0.), universe.to_vec());
    assert_eq!(
        Defuzzification::LambdaCut { alpha: 0.5 }.call(&universe, &membership),
        Ok(2.)
    );
    assert_eq!(
        Defuzzification::LambdaCut { alpha: 1.5 }.call(&universe, &membership),
        Err(FuzzyError::EmptyCut { alpha: 1.5 })
    );
}

#[test]
fn test_height_method() {
    let universe = [0., 1., 2., 3., 4.];

    assert_eq!(height_method(&universe, &[0., 0.25, 0.5, 0., 0.]), Ok(2.));
    assert_eq!(height_method(&universe, &[0.; 5]), Err(FuzzyError::ZeroMembershipMass));
}

#[test]
fn test_reduction() {
    assert_eq!(Reduction::default(), Reduction::Mean);
    assert_eq!(Reduction::Mean.reduce(&[1., 2., 6.]), Some(3.));
    assert_eq!(Reduction::Min.reduce(&[1., 2., 6.]), Some(1.));
    assert_eq!(Reduction::Max.reduce(&[1., 2., 6.]), Some(6.));
    assert_eq!(Reduction::Mean.reduce::<f64>(&[]), None);
}

#[test]
fn test_single_precision_defuzzification() {
    let universe = [0f32, 1., 2., 3., 4.];
    let membership = [0f32, 0.5, 1., 0.5, 0.];

    assert_eq!(Defuzzification::Centroid.call(&universe, &membership), Ok(2f32));
    assert_eq!(Defuzzification::Bisector.call(&universe, &membership), Ok(2f32));
    assert_eq!(Defuzzification::HeightMethod.call(&universe, &membership), Ok(2f32));
    assert_eq!(
        Defuzzification::LambdaCut { alpha: 0.5 }.call(&universe, &membership),
        Ok(2f32)
    );
}

#[test]
fn test_parse_methods() {
    assert_eq!("Centroid".parse::<Defuzzification>(), Ok(Defuzzification::Centroid));
    assert_eq!("Mean of Maximum".parse::<Defuzzification>(), Ok(Defuzzification::MeanOfMaximum));
    assert_eq!(
        "Lambda-cut".parse::<Defuzzification>(),
        Ok(Defuzzification::LambdaCut { alpha: DEFAULT_ALPHA })
    );
    assert_eq!("Height Method".parse::<Defuzzification>(), Ok(Defuzzification::HeightMethod));
    assert!("median".parse::<Defuzzification>().is_err());
    assert_eq!(Defuzzification::LambdaCut { alpha: 0.25 }.to_string(), "lambda_cut(0.25)");
}
