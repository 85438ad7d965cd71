use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;

/// The discretized domain of discourse a fuzzy set is defined over.
///
/// Samples are finite and non-decreasing. A `Universe` is immutable and cheap
/// to clone; every set derived from another shares its sample buffer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "Vec<f64>", try_from = "Vec<f64>")]
pub struct Universe(Arc<[f64]>);

impl Universe {
    pub fn new(points: Vec<f64>) -> Result<Self> {
        if points.is_empty() {
            return Err(FuzzyError::InvalidUniverse {
                reason: "no sample points",
            });
        }
        if points.iter().any(|x| !x.is_finite()) {
            return Err(FuzzyError::InvalidUniverse {
                reason: "sample points must be finite",
            });
        }
        if points.windows(2).any(|w| w[1] < w[0]) {
            return Err(FuzzyError::InvalidUniverse {
                reason: "sample points must be non-decreasing",
            });
        }

        Ok(Universe(points.into()))
    }

    /// `n` evenly spaced samples from `min` to `max`, both inclusive.
    pub fn linspace(min: f64, max: f64, n: usize) -> Result<Self> {
        UniverseConfig { min, max, points: n }.build()
    }

    pub fn points(&self) -> &[f64] {
        &self.0
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Two universes are compatible when they hold the same samples in the same order.
    pub fn is_compatible(&self, other: &Universe) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0[..] == other.0[..]
    }

    pub(crate) fn ensure_compatible(&self, other: &Universe) -> Result<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(FuzzyError::IncompatibleUniverses {
                left: self.len(),
                right: other.len(),
            })
        }
    }

    /// Whether both universes point at the same sample buffer.
    pub fn shares_buffer(&self, other: &Universe) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Universe {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for Universe {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl PartialEq for Universe {
    fn eq(&self, other: &Self) -> bool {
        self.is_compatible(other)
    }
}

impl TryFrom<Vec<f64>> for Universe {
    type Error = FuzzyError;

    fn try_from(points: Vec<f64>) -> Result<Self> {
        Universe::new(points)
    }
}

impl From<Universe> for Vec<f64> {
    fn from(universe: Universe) -> Self {
        universe.0.to_vec()
    }
}

/// Bounds and resolution of an evenly sampled universe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    pub min: f64,
    pub max: f64,
    /// Number of sample points, both bounds included.
    pub points: usize,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        UniverseConfig {
            min: 0.,
            max: 10.,
            points: 200,
        }
    }
}

impl UniverseConfig {
    pub fn build(&self) -> Result<Universe> {
        let UniverseConfig { min, max, points } = *self;

        if !min.is_finite() || !max.is_finite() {
            return Err(FuzzyError::InvalidUniverse {
                reason: "bounds must be finite",
            });
        }
        if min > max {
            return Err(FuzzyError::InvalidUniverse {
                reason: "min must not exceed max",
            });
        }
        if points == 0 {
            return Err(FuzzyError::InvalidUniverse {
                reason: "at least one sample point is required",
            });
        }
        if points == 1 && min != max {
            return Err(FuzzyError::InvalidUniverse {
                reason: "a single sample point requires min == max",
            });
        }

        tracing::trace!(min, max, points, "building universe");

        Universe::new(Linspace::new(min, max, points).collect())
    }
}

#[test]
fn test_default_config() {
    let universe = UniverseConfig::default().build().unwrap();

    assert_eq!(universe.len(), 200);
    assert_eq!(universe.min(), 0.);
    assert_eq!(universe.max(), 10.);
}

#[test]
fn test_config_validation() {
    let bad = [
        UniverseConfig { min: 1., max: 0., points: 10 },
        UniverseConfig { min: 0., max: 1., points: 0 },
        UniverseConfig { min: 0., max: 1., points: 1 },
        UniverseConfig { min: f64::NAN, max: 1., points: 5 },
    ];

    for config in bad {
        assert!(matches!(config.build(), Err(FuzzyError::InvalidUniverse { .. })));
    }

    assert_eq!(Universe::linspace(2., 2., 1).unwrap().points(), &[2.]);
}

#[test]
fn test_universe_validation() {
    assert!(Universe::new(Vec::new()).is_err());
    assert!(Universe::new(vec![0., 2., 1.]).is_err());
    assert!(Universe::new(vec![0., f64::INFINITY]).is_err());
    assert!(Universe::new(vec![0., 1., 1., 2.]).is_ok());
}

#[test]
fn test_compatibility() {
    let a = Universe::linspace(0., 1., 11).unwrap();
    let b = Universe::linspace(0., 1., 11).unwrap();
    let c = Universe::linspace(0., 1., 12).unwrap();

    assert!(a.is_compatible(&a.clone()));
    assert!(a.shares_buffer(&a.clone()));
    assert!(a.is_compatible(&b));
    assert!(!a.shares_buffer(&b));
    assert_eq!(
        a.ensure_compatible(&c),
        Err(FuzzyError::IncompatibleUniverses { left: 11, right: 12 })
    );
}

#[test]
fn test_config_from_json() {
    let config: UniverseConfig = serde_json::from_str(r#"{ "max": 1.0, "points": 101 }"#).unwrap();

    assert_eq!(config, UniverseConfig { min: 0., max: 1., points: 101 });

    let universe: Universe = serde_json::from_str("[0.0, 0.5, 1.0]").unwrap();
    assert_eq!(universe.points(), &[0., 0.5, 1.]);
    assert!(serde_json::from_str::<Universe>("[1.0, 0.0]").is_err());
}
