//! Incremental statistics accumulator.
//!
//! Accumulates samples one at a time and reports mean, variance, and the
//! standard error of the mean.  The sampling driver feeds discounted path
//! values into one of these and reads the error estimate for its stopping
//! rule.

use bsm_core::{Real, Size};

/// Incremental statistics accumulator over equally-weighted samples.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    count: Size,
    sum: Real,
    sum_sq: Real,
    min: Real,
    max: Real,
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        self.sum += x;
        self.sum_sq += x * x;
        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
    }

    /// Number of samples.
    pub fn samples(&self) -> Size {
        self.count
    }

    /// Sample mean.  Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as Real)
        }
    }

    /// Unbiased sample variance.  Returns `None` for fewer than 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        let m = self.sum / n;
        // guard against cancellation pushing the estimate slightly negative
        let s2 = ((self.sum_sq / n - m * m) * n / (n - 1.0)).max(0.0);
        Some(s2)
    }

    /// Sample standard deviation.  Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(|v| v.sqrt())
    }

    /// Standard error of the mean, `σ/√n`.
    ///
    /// This is the error estimate the sampling driver compares against its
    /// required tolerance.  Returns `None` for fewer than 2 samples.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }

    /// Minimum sample value.  Returns `None` if no samples have been added.
    pub fn minimum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.min)
    }

    /// Maximum sample value.  Returns `None` if no samples have been added.
    pub fn maximum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.max)
    }

    /// Reset the accumulator to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn moments_of_a_small_sample() {
        let mut s = Statistics::new();
        for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
            s.add(x);
        }
        assert_eq!(s.samples(), 5);
        assert_relative_eq!(s.mean().unwrap(), 3.0);
        assert_relative_eq!(s.variance().unwrap(), 2.5);
        assert_relative_eq!(s.error_estimate().unwrap(), (2.5_f64 / 5.0).sqrt());
        assert_eq!(s.minimum().unwrap(), 1.0);
        assert_eq!(s.maximum().unwrap(), 5.0);
    }

    #[test]
    fn empty_accumulator_reports_none() {
        let s = Statistics::new();
        assert!(s.mean().is_none());
        assert!(s.variance().is_none());
        assert!(s.error_estimate().is_none());
    }

    #[test]
    fn error_estimate_shrinks_with_sample_count() {
        let mut small = Statistics::new();
        let mut large = Statistics::new();
        for i in 0..100 {
            small.add((i % 7) as Real);
        }
        for i in 0..10_000 {
            large.add((i % 7) as Real);
        }
        assert!(large.error_estimate().unwrap() < small.error_estimate().unwrap());
    }
}
