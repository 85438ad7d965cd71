/// Evenly spaced samples over a closed interval, in the manner of `numpy.linspace`.
///
/// The final sample is exactly `max` rather than `min + step * (n - 1)`, so a
/// universe built from integral bounds ends on its bound without rounding drift.
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        if self.len > 1 && i == self.len - 1 {
            Some(self.end)
        } else {
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace_endpoints() {
    let xs: Vec<_> = Linspace::new(0., 10., 200).collect();

    assert_eq!(xs.len(), 200);
    assert_eq!(xs[0], 0.);
    assert_eq!(xs[199], 10.);
    assert!((xs[1] - 10. / 199.).abs() < 1e-12);
}

#[test]
fn test_linspace_small() {
    assert_eq!(Linspace::new(1., 5., 5).collect::<Vec<_>>(), vec![1., 2., 3., 4., 5.]);
    assert_eq!(Linspace::new(3., 7., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}
