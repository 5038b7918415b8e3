//! The sampling driver: accumulates path values until a stopping rule.

use bsm_core::{ensure, Real, Result, Size};
use bsm_math::Statistics;

use super::path_generator::PathGenerator;
use super::path_pricer::PathPricer;

/// Samples added before the first error-estimate check under a tolerance
/// stopping rule.
const MIN_SAMPLES: Size = 1_023;

/// Drives a Monte Carlo simulation: draws paths, prices them, and
/// accumulates the discounted values.
///
/// With antithetic sampling enabled, each draw contributes the average of
/// the path's value and its antithetic companion's as a single sample.
#[derive(Debug)]
pub struct MonteCarloModel<P: PathPricer> {
    generator: PathGenerator,
    pricer: P,
    antithetic: bool,
    statistics: Statistics,
}

impl<P: PathPricer> MonteCarloModel<P> {
    /// Wire a model from a path generator and a path pricer.
    pub fn new(generator: PathGenerator, pricer: P, antithetic: bool) -> Self {
        Self {
            generator,
            pricer,
            antithetic,
            statistics: Statistics::new(),
        }
    }

    /// Draw and price `n` further samples.
    pub fn add_samples(&mut self, n: Size) {
        for _ in 0..n {
            let path = self.generator.next_path();
            let value = self.pricer.value(&path);
            if self.antithetic {
                let companion = self.generator.antithetic_path();
                self.statistics
                    .add(0.5 * (value + self.pricer.value(&companion)));
            } else {
                self.statistics.add(value);
            }
        }
    }

    /// The accumulated sample statistics.
    pub fn sample_statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Run the simulation until a stopping rule is met and return the
    /// accumulated statistics.
    ///
    /// Exactly one of `required_tolerance` (target standard error of the
    /// mean) and `required_samples` must be given; `max_samples` caps the
    /// total draw count under the tolerance rule.
    pub fn sample(
        &mut self,
        required_tolerance: Option<Real>,
        required_samples: Option<Size>,
        max_samples: Size,
    ) -> Result<&Statistics> {
        match (required_tolerance, required_samples) {
            (None, Some(samples)) => {
                ensure!(samples > 0, "required sample count must be positive");
                ensure!(
                    samples <= max_samples,
                    "required samples {samples} exceed the cap of {max_samples}"
                );
                self.add_samples(samples - self.statistics.samples().min(samples));
            }
            (Some(tolerance), None) => {
                ensure!(
                    tolerance > 0.0,
                    "required tolerance must be positive, got {tolerance}"
                );
                let initial = MIN_SAMPLES.min(max_samples);
                if self.statistics.samples() < initial {
                    self.add_samples(initial - self.statistics.samples());
                }
                loop {
                    let drawn = self.statistics.samples();
                    let error = match self.statistics.error_estimate() {
                        Some(e) => e,
                        None => break,
                    };
                    if error <= tolerance || drawn >= max_samples {
                        break;
                    }
                    // projected total for the target accuracy, since the
                    // error shrinks as 1/√n
                    let projected = (drawn as Real * (error / tolerance).powi(2)).ceil() as Size;
                    let next = projected.clamp(drawn + 1, max_samples);
                    self.add_samples(next - drawn);
                }
            }
            (Some(_), Some(_)) | (None, None) => {
                return Err(bsm_core::Error::InvalidArgument(
                    "exactly one of required tolerance and required samples must be set"
                        .to_string(),
                ));
            }
        }
        Ok(&self.statistics)
    }
}
