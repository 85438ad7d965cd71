//! Parametric membership-function families.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::math::interp;

/// A parametric membership function.
///
/// Parameters are checked by [`MembershipShape::validate`] before a curve is
/// sampled, so a sampled curve never contains an undefined value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MembershipShape {
    /// Rises linearly from `a` to a peak at `b`, falls back to zero at `c`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Rises from `a` to `b`, is flat at one between `b` and `c`, falls to zero at `d`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// Bell curve centered on `c` with standard deviation `sigma`.
    Gaussian { c: f64, sigma: f64 },
    /// Generalized bell with width `a`, slope `b` and center `c`.
    Bell { a: f64, b: f64, c: f64 },
    /// Logistic curve with slope `a` crossing one half at `c`.
    Sigmoid { a: f64, c: f64 },
}

impl MembershipShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Triangular { .. } => "triangular",
            Self::Trapezoidal { .. } => "trapezoidal",
            Self::Gaussian { .. } => "gaussian",
            Self::Bell { .. } => "bell",
            Self::Sigmoid { .. } => "sigmoid",
        }
    }

    fn params(&self) -> Vec<f64> {
        match *self {
            Self::Triangular { a, b, c } => vec![a, b, c],
            Self::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
            Self::Gaussian { c, sigma } => vec![c, sigma],
            Self::Bell { a, b, c } => vec![a, b, c],
            Self::Sigmoid { a, c } => vec![a, c],
        }
    }

    pub fn validate(&self) -> Result<()> {
        let degenerate = |reason| FuzzyError::DegenerateShape {
            shape: self.name(),
            reason,
        };

        if self.params().iter().any(|p| !p.is_finite()) {
            return Err(degenerate("parameters must be finite"));
        }

        match *self {
            Self::Triangular { a, b, c } => {
                if !(a < b && b < c) {
                    return Err(degenerate("breakpoints must satisfy a < b < c"));
                }
            },
            Self::Trapezoidal { a, b, c, d } => {
                if !(a < b && b <= c && c < d) {
                    return Err(degenerate("breakpoints must satisfy a < b <= c < d"));
                }
            },
            Self::Gaussian { sigma, .. } => {
                if sigma <= 0. {
                    return Err(degenerate("sigma must be positive"));
                }
            },
            Self::Bell { a, .. } => {
                if a == 0. {
                    return Err(degenerate("width must be non-zero"));
                }
            },
            Self::Sigmoid { .. } => {},
        }

        Ok(())
    }

    /// Membership degree at `x`. Assumes validated parameters.
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Self::Triangular { a, b, c } => f64::max(0., f64::min((x - a) / (b - a), (c - x) / (c - b))),
            Self::Trapezoidal { a, b, c, d } => f64::max(
                0.,
                f64::min(f64::min((x - a) / (b - a), 1.), (d - x) / (d - c)),
            ),
            Self::Gaussian { c, sigma } => (-0.5 * ((x - c) / sigma).powi(2)).exp(),
            Self::Bell { a, b, c } => 1. / (1. + ((x - c) / a).abs().powf(2. * b)),
            Self::Sigmoid { a, c } => 1. / (1. + (-a * (x - c)).exp()),
        }
    }

    pub fn sample(&self, universe: &[f64]) -> Result<Vec<f64>> {
        self.validate()?;

        Ok(universe.iter().map(|&x| self.evaluate(x)).collect())
    }
}

impl fmt::Display for MembershipShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangular { a, b, c } => write!(f, "Triangular({a},{b},{c})"),
            Self::Trapezoidal { a, b, c, d } => write!(f, "Trapezoidal({a},{b},{c},{d})"),
            Self::Gaussian { c, sigma } => write!(f, "Gaussian({c},{sigma})"),
            Self::Bell { a, b, c } => write!(f, "Bell({a},{b},{c})"),
            Self::Sigmoid { a, c } => write!(f, "Sigmoid({a},{c})"),
        }
    }
}

/// Spreads `values` evenly across `[min, max]` of the universe and linearly
/// interpolates them onto every sample point. Values are not clamped.
pub(crate) fn spread_values(universe: &[f64], values: &[f64]) -> Result<Vec<f64>> {
    let (Some(&min_u), Some(&max_u)) = (universe.first(), universe.last()) else {
        return Err(FuzzyError::InvalidUniverse {
            reason: "no sample points",
        });
    };
    if values.is_empty() {
        return Err(FuzzyError::EmptyInput);
    }
    if let Some(v) = values.iter().find(|v| !v.is_finite()) {
        return Err(FuzzyError::InvalidValue { token: v.to_string() });
    }
    // One value per sample point maps one to one.
    if values.len() == universe.len() {
        return Ok(values.to_vec());
    }

    let coords: Vec<_> = Linspace::new(min_u, max_u, values.len())
        .zip(values.iter().copied())
        .collect();

    Ok(interp(universe.iter().copied(), &coords))
}

#[test]
fn test_triangular_shape() {
    let shape = MembershipShape::Triangular { a: 2., b: 5., c: 8. };

    assert_eq!(shape.evaluate(0.), 0.);
    assert_eq!(shape.evaluate(2.), 0.);
    assert_eq!(shape.evaluate(3.5), 0.5);
    assert_eq!(shape.evaluate(5.), 1.);
    assert_eq!(shape.evaluate(6.5), 0.5);
    assert_eq!(shape.evaluate(9.), 0.);
}

#[test]
fn test_trapezoidal_shape() {
    let shape = MembershipShape::Trapezoidal { a: 2., b: 4., c: 6., d: 8. };

    assert_eq!(shape.evaluate(3.), 0.5);
    assert_eq!(shape.evaluate(4.), 1.);
    assert_eq!(shape.evaluate(5.), 1.);
    assert_eq!(shape.evaluate(7.), 0.5);
    assert_eq!(shape.evaluate(10.), 0.);
}

#[test]
fn test_smooth_shapes() {
    let gaussian = MembershipShape::Gaussian { c: 5., sigma: 1. };
    assert_eq!(gaussian.evaluate(5.), 1.);
    assert!((gaussian.evaluate(6.) - (-0.5f64).exp()).abs() < 1e-12);

    let bell = MembershipShape::Bell { a: 2., b: 2., c: 5. };
    assert_eq!(bell.evaluate(5.), 1.);
    assert_eq!(bell.evaluate(7.), 0.5);

    let sigmoid = MembershipShape::Sigmoid { a: 1., c: 5. };
    assert_eq!(sigmoid.evaluate(5.), 0.5);
    assert!(sigmoid.evaluate(10.) > 0.99);
}

#[test]
fn test_degenerate_shapes() {
    let shapes = [
        MembershipShape::Triangular { a: 2., b: 2., c: 8. },
        MembershipShape::Triangular { a: 2., b: 8., c: 8. },
        MembershipShape::Triangular { a: 5., b: 2., c: 8. },
        MembershipShape::Trapezoidal { a: 2., b: 2., c: 6., d: 8. },
        MembershipShape::Trapezoidal { a: 2., b: 6., c: 4., d: 8. },
        MembershipShape::Trapezoidal { a: 2., b: 4., c: 8., d: 8. },
        MembershipShape::Gaussian { c: 5., sigma: 0. },
        MembershipShape::Gaussian { c: f64::NAN, sigma: 1. },
        MembershipShape::Bell { a: 0., b: 2., c: 5. },
        MembershipShape::Sigmoid { a: f64::INFINITY, c: 5. },
    ];

    for shape in shapes {
        assert!(
            matches!(shape.validate(), Err(FuzzyError::DegenerateShape { .. })),
            "{shape} should be rejected"
        );
    }

    // A trapezoid collapsed to a triangle is still well defined.
    assert!(MembershipShape::Trapezoidal { a: 2., b: 5., c: 5., d: 8. }.validate().is_ok());
}

#[test]
fn test_shape_from_json() {
    let shape: MembershipShape = serde_json::from_str(r#"{ "kind": "gaussian", "c": 5.0, "sigma": 1.0 }"#).unwrap();

    assert_eq!(shape, MembershipShape::Gaussian { c: 5., sigma: 1. });
    assert_eq!(shape.to_string(), "Gaussian(5,1)");
}

#[test]
fn test_spread_values() {
    let universe = [0., 2.5, 5., 7.5, 10.];

    assert_eq!(spread_values(&universe, &[0., 1., 0.]).unwrap(), vec![0., 0.5, 1., 0.5, 0.]);
    assert_eq!(spread_values(&universe, &[0.3]).unwrap(), vec![0.3; 5]);
    assert_eq!(spread_values(&universe, &[]), Err(FuzzyError::EmptyInput));
    // Out of range values pass through.
    assert_eq!(spread_values(&[0., 1.], &[-1., 2.]).unwrap(), vec![-1., 2.]);
}
