use num::Float;

/// Relative tolerance used by [`is_close`].
pub const RTOL: f64 = 1e-5;
/// Absolute tolerance used by [`is_close`].
pub const ATOL: f64 = 1e-8;

/// Similar to numpy.interp
///
/// `coords` must be sorted by x and non-empty. Inputs left of the first
/// coordinate take the first y, inputs right of the last take the last y.
pub(crate) fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input.into_iter().map(|x| interp_one(x, coords)).collect()
}

pub(crate) fn interp_one<F: Float>(x: F, coords: &[(F, F)]) -> F {
    debug_assert!(!coords.is_empty());

    if x.is_nan() {
        return x;
    }

    let j = coords.partition_point(|&(xp, _)| xp < x);

    // Base cases
    if j == 0 {
        return coords[0].1;
    }
    let Some(&(x2, y2)) = coords.get(j) else {
        return coords[coords.len() - 1].1;
    };
    if x2 == x {
        return y2;
    }

    let (x1, y1) = coords[j - 1];

    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

/// `|a - b| <= ATOL + RTOL * |b|`
pub fn is_close<F: Float>(a: F, b: F) -> bool {
    let rtol = F::from(RTOL).unwrap_or_else(F::epsilon);
    let atol = F::from(ATOL).unwrap_or_else(F::epsilon);

    (a - b).abs() <= atol + rtol * b.abs()
}

pub fn all_close<F: Float>(a: &[F], b: &[F]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&a, &b)| is_close(a, b))
}

/// `|a - b| <= ATOL + RTOL * max(|a|, |b|)`, so argument order never matters.
pub(crate) fn is_close_symmetric<F: Float>(a: F, b: F) -> bool {
    let rtol = F::from(RTOL).unwrap_or_else(F::epsilon);
    let atol = F::from(ATOL).unwrap_or_else(F::epsilon);

    (a - b).abs() <= atol + rtol * a.abs().max(b.abs())
}

pub(crate) fn all_close_symmetric<F: Float>(a: &[F], b: &[F]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&a, &b)| is_close_symmetric(a, b))
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_interp_single_coordinate() {
    assert_eq!(interp([-1., 0., 1.], &[(0., 0.25)]), vec![0.25, 0.25, 0.25]);
}

#[test]
fn test_interp_hits_sample_points_exactly() {
    let coords = [(1., 0.), (2., 1.), (3., 1.), (4., 0.), (5., 0.)];

    assert_eq!(interp([1., 2., 3., 4., 5.], &coords), vec![0., 1., 1., 0., 0.]);
}

#[test]
fn test_interp_nan_input() {
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert!(interp_one(f64::NAN, &coords).is_nan());
    assert_eq!(interp([f64::NAN, 1.5], &coords)[1], 2.5);
}

#[test]
fn test_is_close_symmetric() {
    let (a, b) = (0.0, 1.000005e-8);

    assert_ne!(is_close(a, b), is_close(b, a));
    assert_eq!(is_close_symmetric(a, b), is_close_symmetric(b, a));

    for (a, b) in [(1.0, 1.00001), (0.0, 1e-8), (100.0, 100.001), (-2.0, -2.00002)] {
        assert_eq!(is_close_symmetric(a, b), is_close_symmetric(b, a), "{a} vs {b}");
    }
    assert!(all_close_symmetric(&[0.1, 0.2], &[0.1, 0.2000001]));
    assert!(!all_close_symmetric(&[0.1], &[0.1, 0.2]));
}

#[test]
fn test_is_close() {
    assert!(is_close(1.0, 1.0 + 1e-9));
    assert!(is_close(0.0, 5e-9));
    assert!(!is_close(0.0, 1e-6));
    assert!(all_close(&[0.1, 0.2], &[0.1, 0.2000001]));
    assert!(!all_close(&[0.1, 0.2], &[0.1]));
}
