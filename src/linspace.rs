use std::ops::RangeInclusive;

use num::Float;

/// Evenly spaced samples over a closed interval, like numpy.linspace.
pub(crate) struct Linspace<F> {
    start: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub(crate) fn new(min: F, max: F, n: usize) -> Self {
        let step = match F::from(n.saturating_sub(1)) {
            Some(num_steps) if n > 1 => (max - min) / num_steps,
            _ => F::zero(),
        };

        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }

    /// Samples `range` roughly every `step`, always including both ends.
    pub(crate) fn with_step(range: &RangeInclusive<F>, step: F) -> Self {
        let (min, max) = (*range.start(), *range.end());
        // floor is the closest match to python's int() truncation for positive spans
        let num = ((max - min) / step).floor().to_usize().unwrap_or(0) + 1;

        Self::new(min, max, num)
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = F::from(self.index)?;
        self.index += 1;

        Some(self.start + self.step * i)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let samples: Vec<f64> = Linspace::new(0., 1., 5).collect();

    assert_eq!(samples, vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(3., 7., 1).collect::<Vec<f64>>(), vec![3.]);
    assert_eq!(Linspace::<f64>::new(3., 7., 0).count(), 0);
}

#[test]
fn test_linspace_with_step() {
    let samples: Vec<f64> = Linspace::with_step(&(0. ..=100.), 0.5).collect();

    assert_eq!(samples.len(), 201);
    assert_eq!(samples[0], 0.);
    assert_eq!(samples[100], 50.);
    assert_eq!(samples[200], 100.);
}
