use std::fmt;

use serde::{Deserialize, Serialize};

use crate::defuzz::{self, Defuzzification, Reduction};
use crate::error::{FuzzyError, Result};
use crate::math::{all_close, all_close_symmetric, interp_one};
use crate::membership::{spread_values, MembershipShape};
use crate::ops::{Implication, SetOp};
use crate::universe::Universe;

/// A fuzzy set sampled over a discretized universe.
///
/// A `FuzzySet` is a value: it has no setters, and every operation returns a
/// new set that shares the operand's [`Universe`] and owns a freshly computed
/// membership curve. Sets can therefore be shared freely between threads.
///
/// The label is a diagnostic string describing how the set was built, e.g.
/// `"(A) ∩ (B)"`. Nothing depends on its contents.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawFuzzySet")]
pub struct FuzzySet {
    universe: Universe,
    membership: Vec<f64>,
    label: String,
}

#[derive(Deserialize)]
struct RawFuzzySet {
    universe: Universe,
    membership: Vec<f64>,
    #[serde(default)]
    label: String,
}

impl TryFrom<RawFuzzySet> for FuzzySet {
    type Error = FuzzyError;

    fn try_from(raw: RawFuzzySet) -> Result<Self> {
        FuzzySet::new(raw.universe, raw.membership, raw.label)
    }
}

impl FuzzySet {
    /// Pairs a universe with explicit membership degrees, one per sample point.
    pub fn new(universe: Universe, membership: Vec<f64>, label: impl Into<String>) -> Result<Self> {
        if universe.len() != membership.len() {
            return Err(FuzzyError::LengthMismatch {
                universe: universe.len(),
                membership: membership.len(),
            });
        }

        Ok(FuzzySet {
            universe,
            membership,
            label: label.into(),
        })
    }

    pub fn from_shape(universe: &Universe, shape: MembershipShape) -> Result<Self> {
        let membership = shape.sample(universe).map_err(|err| {
            tracing::debug!(%shape, %err, "rejected membership function");
            err
        })?;

        tracing::debug!(%shape, points = universe.len(), "sampled membership function");

        Ok(FuzzySet {
            universe: universe.clone(),
            membership,
            label: shape.to_string(),
        })
    }

    pub fn triangular(universe: &Universe, a: f64, b: f64, c: f64) -> Result<Self> {
        Self::from_shape(universe, MembershipShape::Triangular { a, b, c })
    }

    pub fn trapezoidal(universe: &Universe, a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        Self::from_shape(universe, MembershipShape::Trapezoidal { a, b, c, d })
    }

    pub fn gaussian(universe: &Universe, c: f64, sigma: f64) -> Result<Self> {
        Self::from_shape(universe, MembershipShape::Gaussian { c, sigma })
    }

    pub fn bell(universe: &Universe, a: f64, b: f64, c: f64) -> Result<Self> {
        Self::from_shape(universe, MembershipShape::Bell { a, b, c })
    }

    pub fn sigmoid(universe: &Universe, a: f64, c: f64) -> Result<Self> {
        Self::from_shape(universe, MembershipShape::Sigmoid { a, c })
    }

    /// Builds a set from hand-entered membership values.
    ///
    /// With one value per sample point the values are used as given. Otherwise
    /// they are spaced evenly from the universe's minimum to its maximum and
    /// linearly interpolated onto every sample point. Values outside `[0, 1]`
    /// are kept as they are.
    pub fn manual(universe: &Universe, values: &[f64]) -> Result<Self> {
        let membership = spread_values(universe, values).map_err(|err| {
            tracing::debug!(values = values.len(), points = universe.len(), %err, "rejected manual values");
            err
        })?;

        tracing::debug!(values = values.len(), points = universe.len(), "built manual membership");

        Ok(FuzzySet {
            universe: universe.clone(),
            membership,
            label: "Manual".to_owned(),
        })
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn membership(&self) -> &[f64] {
        &self.membership
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn len(&self) -> usize {
        self.membership.len()
    }

    pub fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }

    /// `(x, μ(x))` pairs in universe order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.universe.iter().copied().zip(self.membership.iter().copied())
    }

    /// Largest membership degree.
    pub fn height(&self) -> f64 {
        defuzz::peak(&self.membership).unwrap_or(f64::NAN)
    }

    /// Sample points with non-zero membership.
    pub fn support(&self) -> Vec<f64> {
        self.iter().filter(|&(_, m)| m > 0.).map(|(x, _)| x).collect()
    }

    /// Sample points with full membership.
    pub fn core(&self) -> Vec<f64> {
        self.iter().filter(|&(_, m)| m == 1.).map(|(x, _)| x).collect()
    }

    /// Membership of an arbitrary crisp value, linearly interpolated between
    /// the neighbouring samples and held constant past either end. A NaN
    /// input yields NaN.
    pub fn membership_at(&self, x: f64) -> f64 {
        let coords: Vec<_> = self.iter().collect();

        interp_one(x, &coords)
    }

    fn derive(&self, membership: Vec<f64>, label: String) -> FuzzySet {
        FuzzySet {
            universe: self.universe.clone(),
            membership,
            label,
        }
    }

    /// Membership curves are equal within the [`is_close`](crate::is_close) tolerances.
    ///
    /// Comparing sets over different universes is an error rather than `false`.
    pub fn try_eq(&self, other: &FuzzySet) -> Result<bool> {
        self.universe.ensure_compatible(&other.universe).map_err(|err| {
            tracing::debug!(left = %self.label, right = %other.label, %err, "cannot compare sets");
            err
        })?;

        Ok(all_close(&self.membership, &other.membership))
    }

    // Unary operations

    pub fn complement(&self) -> FuzzySet {
        let membership = self.membership.iter().map(|m| 1. - m).collect();

        self.derive(membership, format!("¬({})", self.label))
    }

    /// `clamp(k·μ, 0, 1)`
    pub fn multiply_by_crisp(&self, k: f64) -> FuzzySet {
        let membership = self.membership.iter().map(|m| (k * m).clamp(0., 1.)).collect();

        self.derive(membership, format!("{k}·({})", self.label))
    }

    /// `μ^p`, for non-negative degrees.
    pub fn power(&self, p: f64) -> FuzzySet {
        let membership = self.membership.iter().map(|m| m.powf(p)).collect();

        self.derive(membership, format!("({})^{p}", self.label))
    }

    // Binary operations

    pub fn apply(&self, op: SetOp, other: &FuzzySet) -> Result<FuzzySet> {
        self.universe.ensure_compatible(&other.universe).map_err(|err| {
            tracing::debug!(%op, left = %self.label, right = %other.label, %err, "rejected operands");
            err
        })?;

        let membership = op
            .call(self.membership.iter().copied(), other.membership.iter().copied())
            .collect();

        Ok(self.derive(membership, op.label(&self.label, &other.label)))
    }

    pub fn intersection(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.apply(SetOp::Intersection, other)
    }

    pub fn union(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.apply(SetOp::Union, other)
    }

    pub fn algebraic_product(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.apply(SetOp::AlgebraicProduct, other)
    }

    pub fn algebraic_sum(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.apply(SetOp::AlgebraicSum, other)
    }

    pub fn algebraic_difference(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.apply(SetOp::AlgebraicDifference, other)
    }

    pub fn bounded_sum(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.apply(SetOp::BoundedSum, other)
    }

    pub fn bounded_difference(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.apply(SetOp::BoundedDifference, other)
    }

    // Implications, with `self` as the antecedent

    pub fn implication(&self, imp: Implication, consequent: &FuzzySet) -> Result<FuzzySet> {
        self.universe.ensure_compatible(&consequent.universe).map_err(|err| {
            tracing::debug!(%imp, antecedent = %self.label, consequent = %consequent.label, %err, "rejected implication operands");
            err
        })?;

        let membership = imp
            .call(self.membership.iter().copied(), consequent.membership.iter().copied())
            .collect();

        Ok(self.derive(membership, imp.label(&self.label, &consequent.label)))
    }

    pub fn zadeh_implication(&self, consequent: &FuzzySet) -> Result<FuzzySet> {
        self.implication(Implication::Zadeh, consequent)
    }

    pub fn mamdani_implication(&self, consequent: &FuzzySet) -> Result<FuzzySet> {
        self.implication(Implication::Mamdani, consequent)
    }

    pub fn larsen_implication(&self, consequent: &FuzzySet) -> Result<FuzzySet> {
        self.implication(Implication::Larsen, consequent)
    }

    // Defuzzification

    pub fn defuzzify(&self, method: Defuzzification) -> Result<f64> {
        method.call(&self.universe, &self.membership)
    }

    pub fn centroid(&self) -> Result<f64> {
        self.defuzzify(Defuzzification::Centroid)
    }

    pub fn bisector(&self) -> Result<f64> {
        self.defuzzify(Defuzzification::Bisector)
    }

    pub fn mean_of_maximum(&self) -> Result<f64> {
        self.defuzzify(Defuzzification::MeanOfMaximum)
    }

    pub fn smallest_of_maximum(&self) -> Result<f64> {
        self.defuzzify(Defuzzification::SmallestOfMaximum)
    }

    pub fn largest_of_maximum(&self) -> Result<f64> {
        self.defuzzify(Defuzzification::LargestOfMaximum)
    }

    /// Every sample point whose membership is at least `alpha`.
    pub fn lambda_cut(&self, alpha: f64) -> Vec<f64> {
        defuzz::lambda_cut(&self.universe, &self.membership, alpha)
    }

    /// The lambda-cut collapsed to one value by `reduction`.
    pub fn lambda_cut_value(&self, alpha: f64, reduction: Reduction) -> Result<f64> {
        reduction
            .reduce(&self.lambda_cut(alpha))
            .ok_or(FuzzyError::EmptyCut { alpha })
    }

    pub fn weighted_average(&self) -> Result<f64> {
        self.defuzzify(Defuzzification::WeightedAverage)
    }

    pub fn height_method(&self) -> Result<f64> {
        self.defuzzify(Defuzzification::HeightMethod)
    }

    /// Single-set center of sums, which reduces to the centroid.
    pub fn center_of_sums(&self) -> Result<f64> {
        self.defuzzify(Defuzzification::CenterOfSums)
    }

    pub fn center_of_area(&self) -> Result<f64> {
        self.defuzzify(Defuzzification::CenterOfArea)
    }
}

impl PartialEq for FuzzySet {
    /// Sets over different universes are never equal. Unlike
    /// [`try_eq`](FuzzySet::try_eq), the relative tolerance scales with the
    /// larger magnitude so that `a == b` always agrees with `b == a`.
    fn eq(&self, other: &Self) -> bool {
        self.universe.is_compatible(&other.universe)
            && all_close_symmetric(&self.membership, &other.membership)
    }
}

impl fmt::Display for FuzzySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} points]", self.label, self.len())
    }
}

impl Implication {
    /// Fires the rule for a crisp antecedent degree `strength`, e.g. `μA(x)`,
    /// against the whole consequent curve.
    pub fn fire(self, strength: f64, consequent: &FuzzySet) -> FuzzySet {
        let membership = consequent
            .membership
            .iter()
            .map(|&v| self.evaluate(strength, v))
            .collect();
        let label = self.label(&strength.to_string(), &consequent.label);

        consequent.derive(membership, label)
    }
}

#[cfg(test)]
fn universe(points: &[f64]) -> Universe {
    Universe::new(points.to_vec()).unwrap()
}

#[test]
fn test_new_checks_lengths() {
    let u = universe(&[0., 1., 2.]);

    assert!(FuzzySet::new(u.clone(), vec![0., 1., 0.], "A").is_ok());
    assert_eq!(
        FuzzySet::new(u, vec![0., 1.], "A").unwrap_err(),
        FuzzyError::LengthMismatch {
            universe: 3,
            membership: 2
        }
    );
}

#[test]
fn test_operations_share_universe() {
    let u = Universe::linspace(0., 10., 11).unwrap();
    let a = FuzzySet::triangular(&u, 2., 5., 8.).unwrap();
    let b = FuzzySet::gaussian(&u, 5., 1.).unwrap();

    let c = a.union(&b).unwrap().complement().power(2.);

    assert!(c.universe().shares_buffer(&u));
    assert_eq!(c.label(), "(¬((Triangular(2,5,8)) ∪ (Gaussian(5,1))))^2");
}

#[test]
fn test_incompatible_universes() {
    let a = FuzzySet::triangular(&Universe::linspace(0., 10., 11).unwrap(), 2., 5., 8.).unwrap();
    let b = FuzzySet::triangular(&Universe::linspace(0., 10., 21).unwrap(), 2., 5., 8.).unwrap();
    let err = FuzzyError::IncompatibleUniverses { left: 11, right: 21 };

    assert_eq!(a.intersection(&b).unwrap_err(), err);
    assert_eq!(a.mamdani_implication(&b).unwrap_err(), err);
    assert_eq!(a.try_eq(&b), Err(err));
    assert!(a != b);
}

#[test]
fn test_multiply_by_crisp_clamps() {
    let a = FuzzySet::new(universe(&[0., 1., 2.]), vec![0.2, 0.5, 1.], "A").unwrap();

    assert_eq!(a.multiply_by_crisp(2.).membership(), &[0.4, 1., 1.]);
    assert_eq!(a.multiply_by_crisp(-1.).membership(), &[0., 0., 0.]);
    assert_eq!(a.multiply_by_crisp(2.).label(), "2·(A)");
}

#[test]
fn test_manual_matches_universe() {
    let u = universe(&[1., 2., 3., 4., 5.]);
    let set = FuzzySet::manual(&u, &[0., 1., 1., 0., 0.]).unwrap();

    assert_eq!(set.membership(), &[0., 1., 1., 0., 0.]);
    assert_eq!(set.label(), "Manual");
}

#[test]
fn test_manual_interpolates_short_lists() {
    let u = Universe::linspace(0., 4., 5).unwrap();
    let set = FuzzySet::manual(&u, &[0., 1., 0.]).unwrap();

    assert_eq!(set.membership(), &[0., 0.5, 1., 0.5, 0.]);
}

#[test]
fn test_membership_at() {
    let set = FuzzySet::new(universe(&[0., 1., 2.]), vec![0., 1., 0.], "A").unwrap();

    assert_eq!(set.membership_at(0.5), 0.5);
    assert_eq!(set.membership_at(1.), 1.);
    assert_eq!(set.membership_at(-3.), 0.);
    assert_eq!(set.membership_at(9.), 0.);
    assert!(set.membership_at(f64::NAN).is_nan());
}

#[test]
fn test_power() {
    let a = FuzzySet::new(universe(&[0., 1., 2.]), vec![0., 0.25, 1.], "A").unwrap();

    assert_eq!(a.power(0.5).membership(), &[0., 0.5, 1.]);
    assert_eq!(a.power(2.).membership(), &[0., 0.0625, 1.]);
    assert_eq!(a.power(1.).membership(), a.membership());
    assert_eq!(a.power(0.5).label(), "(A)^0.5");
}

#[test]
fn test_equality_is_symmetric() {
    let u = universe(&[0.]);
    let a = FuzzySet::new(u.clone(), vec![0.], "A").unwrap();
    let b = FuzzySet::new(u.clone(), vec![1.000005e-8], "B").unwrap();

    assert_eq!(a == b, b == a);
    assert_ne!(a.try_eq(&b), b.try_eq(&a));

    let c = FuzzySet::new(u.clone(), vec![0.5], "C").unwrap();
    let d = FuzzySet::new(u, vec![0.5 + 1e-9], "D").unwrap();

    assert!(c == d && d == c);
    assert!(a != c && c != a);
}

#[test]
fn test_rejected_operands_are_errors() {
    let a = FuzzySet::triangular(&Universe::linspace(0., 10., 11).unwrap(), 2., 5., 8.).unwrap();
    let b = FuzzySet::gaussian(&Universe::linspace(0., 5., 11).unwrap(), 2., 1.).unwrap();
    let err = FuzzyError::IncompatibleUniverses { left: 11, right: 11 };

    assert_eq!(a.zadeh_implication(&b).unwrap_err(), err);
    assert_eq!(a.larsen_implication(&b).unwrap_err(), err);
    assert_eq!(b.try_eq(&a), Err(err));
    assert!(a != b);

    assert_eq!(FuzzySet::manual(a.universe(), &[]).unwrap_err(), FuzzyError::EmptyInput);
    assert!(matches!(
        FuzzySet::manual(a.universe(), &[0., f64::NAN]),
        Err(FuzzyError::InvalidValue { .. })
    ));
}

#[test]
fn test_fire_implication() {
    let b = FuzzySet::new(universe(&[0., 1., 2.]), vec![0.2, 1., 0.6], "B").unwrap();

    assert_eq!(Implication::Mamdani.fire(0.5, &b).membership(), &[0.2, 0.5, 0.5]);
    assert_eq!(Implication::Larsen.fire(0.5, &b).membership(), &[0.1, 0.5, 0.3]);
    assert_eq!(Implication::Zadeh.fire(0.75, &b).membership(), &[0.25, 1., 0.6]);
}

#[test]
fn test_support_and_core() {
    let set = FuzzySet::new(universe(&[0., 1., 2., 3.]), vec![0., 0.5, 1., 0.], "A").unwrap();

    assert_eq!(set.support(), vec![1., 2.]);
    assert_eq!(set.core(), vec![2.]);
    assert_eq!(set.height(), 1.);
    assert_eq!(set.to_string(), "A [4 points]");
}

#[test]
fn test_lambda_cut_value() {
    let set = FuzzySet::new(universe(&[0., 1., 2., 3.]), vec![0., 0.5, 1., 0.75], "A").unwrap();

    assert_eq!(set.lambda_cut_value(0.5, Reduction::Mean), Ok(2.));
    assert_eq!(set.lambda_cut_value(0.5, Reduction::Min), Ok(1.));
    assert_eq!(set.lambda_cut_value(0.5, Reduction::Max), Ok(3.));
    assert_eq!(
        set.lambda_cut_value(2., Reduction::Mean),
        Err(FuzzyError::EmptyCut { alpha: 2. })
    );
}

#[test]
fn test_serde_round_trip_validates() {
    let set = FuzzySet::new(universe(&[0., 1.]), vec![0.25, 1.], "A").unwrap();
    let json = serde_json::to_string(&set).unwrap();
    let back: FuzzySet = serde_json::from_str(&json).unwrap();

    assert_eq!(back, set);
    assert_eq!(back.label(), "A");
    assert!(serde_json::from_str::<FuzzySet>(r#"{ "universe": [0.0, 1.0], "membership": [1.0] }"#).is_err());
}
