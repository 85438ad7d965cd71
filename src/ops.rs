use std::fmt;
use std::str::FromStr;

use num::Float;

use crate::error::FuzzyError;

/// Lowercases a method name and folds spaces and dashes into underscores,
/// so `"Bounded Sum"`, `"bounded-sum"` and `"bounded_sum"` all match.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Pointwise binary operation between two membership curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetOp {
    /// min(u, v)
    Intersection,
    /// max(u, v)
    Union,
    /// u * v
    AlgebraicProduct,
    /// u + v - u * v
    AlgebraicSum,
    /// u - u * v
    AlgebraicDifference,
    /// min(1, u + v)
    BoundedSum,
    /// max(0, u - v)
    BoundedDifference,
}

impl SetOp {
    pub const ALL: [SetOp; 7] = [
        Self::Intersection,
        Self::Union,
        Self::AlgebraicProduct,
        Self::AlgebraicSum,
        Self::AlgebraicDifference,
        Self::BoundedSum,
        Self::BoundedDifference,
    ];

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| match self {
            Self::Intersection => F::min(u, v),
            Self::Union => F::max(u, v),
            Self::AlgebraicProduct => u * v,
            Self::AlgebraicSum => u + v - u * v,
            Self::AlgebraicDifference => u - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::BoundedDifference => F::max(F::zero(), u - v),
        })
    }

    pub(crate) fn label(self, a: &str, b: &str) -> String {
        match self {
            Self::Intersection => format!("({a}) ∩ ({b})"),
            Self::Union => format!("({a}) ∪ ({b})"),
            Self::AlgebraicProduct => format!("AlgebraicProd({a},{b})"),
            Self::AlgebraicSum => format!("AlgebraicSum({a},{b})"),
            Self::AlgebraicDifference => format!("AlgDiff({a},{b})"),
            Self::BoundedSum => format!("BoundedSum({a},{b})"),
            Self::BoundedDifference => format!("BoundedDiff({a},{b})"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Intersection => "intersection",
            Self::Union => "union",
            Self::AlgebraicProduct => "algebraic_product",
            Self::AlgebraicSum => "algebraic_sum",
            Self::AlgebraicDifference => "algebraic_difference",
            Self::BoundedSum => "bounded_sum",
            Self::BoundedDifference => "bounded_difference",
        }
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SetOp {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_name(s);

        Self::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| FuzzyError::UnknownMethod {
                kind: "set operation",
                name: s.to_owned(),
            })
    }
}

/// Implication operator method for computing "IF u THEN v".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Implication {
    /// max(1 - u, v)
    Zadeh,
    /// min(u, v)
    Mamdani,
    /// u * v
    Larsen,
}

impl Implication {
    pub const ALL: [Implication; 3] = [Self::Zadeh, Self::Mamdani, Self::Larsen];

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.evaluate(u, v))
    }

    /// The implication for a single antecedent degree `u` and consequent degree `v`.
    #[inline]
    pub fn evaluate<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Zadeh => F::max(F::one() - u, v),
            Self::Mamdani => F::min(u, v),
            Self::Larsen => u * v,
        }
    }

    pub(crate) fn label(self, a: &str, b: &str) -> String {
        match self {
            Self::Zadeh => format!("ZadehImp({a},{b})"),
            Self::Mamdani => format!("MamdaniImp({a},{b})"),
            Self::Larsen => format!("LarsenImp({a},{b})"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Zadeh => "zadeh",
            Self::Mamdani => "mamdani",
            Self::Larsen => "larsen",
        }
    }
}

impl fmt::Display for Implication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Implication {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_name(s);
        let name = name.strip_suffix("_implication").unwrap_or(&name);

        Self::ALL
            .into_iter()
            .find(|imp| imp.name() == name)
            .ok_or_else(|| FuzzyError::UnknownMethod {
                kind: "implication",
                name: s.to_owned(),
            })
    }
}

#[test]
fn test_set_ops() {
    let u = [0.0, 0.25, 0.5, 1.0];
    let v = [1.0, 0.5, 0.5, 0.0];
    let run = |op: SetOp| op.call(u, v).collect::<Vec<f64>>();

    assert_eq!(run(SetOp::Intersection), vec![0.0, 0.25, 0.5, 0.0]);
    assert_eq!(run(SetOp::Union), vec![1.0, 0.5, 0.5, 1.0]);
    assert_eq!(run(SetOp::AlgebraicProduct), vec![0.0, 0.125, 0.25, 0.0]);
    assert_eq!(run(SetOp::AlgebraicSum), vec![1.0, 0.625, 0.75, 1.0]);
    assert_eq!(run(SetOp::AlgebraicDifference), vec![0.0, 0.125, 0.25, 1.0]);
    assert_eq!(run(SetOp::BoundedSum), vec![1.0, 0.75, 1.0, 1.0]);
    assert_eq!(run(SetOp::BoundedDifference), vec![0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_implications() {
    let u = [0.0f32, 0.5, 1.0];
    let v = [0.25f32, 0.75, 0.5];
    let run = |imp: Implication| imp.call(u, v).collect::<Vec<f32>>();

    assert_eq!(run(Implication::Zadeh), vec![1.0, 0.75, 0.5]);
    assert_eq!(run(Implication::Mamdani), vec![0.0, 0.5, 0.5]);
    assert_eq!(run(Implication::Larsen), vec![0.0, 0.375, 0.5]);
}

#[test]
fn test_parse_names() {
    assert_eq!("Bounded Sum".parse::<SetOp>(), Ok(SetOp::BoundedSum));
    assert_eq!("algebraic-difference".parse::<SetOp>(), Ok(SetOp::AlgebraicDifference));
    assert_eq!(" Union ".parse::<SetOp>(), Ok(SetOp::Union));
    assert_eq!("Mamdani".parse::<Implication>(), Ok(Implication::Mamdani));
    assert_eq!("larsen_implication".parse::<Implication>(), Ok(Implication::Larsen));
    assert_eq!(
        "xor".parse::<SetOp>(),
        Err(FuzzyError::UnknownMethod {
            kind: "set operation",
            name: "xor".to_owned()
        })
    );

    for op in SetOp::ALL {
        assert_eq!(op.to_string().parse::<SetOp>(), Ok(op));
    }
}
