//! Monte Carlo pricing session for forward-starting European vanillas.
//!
//! A forward-starting vanilla fixes its strike at a future reset date as a
//! fixed multiple (the moneyness) of the underlying observed there, and
//! pays off at exercise like a plain vanilla on that strike.  The session
//! wires a simulation whose time grid contains both dates exactly, prices
//! each path with a [`ForwardVanillaPathPricer`], and runs the sampling
//! driver until the configured stopping rule is met.

use std::cell::Cell;
use std::sync::Arc;

use bsm_core::{ensure, BigNatural, Error, LazyObject, LazyState, Real, Result, Size, Time};
use bsm_instruments::OptionVariant;
use bsm_math::random_numbers::GaussianSequenceGenerator;
use bsm_methods::monte_carlo::{
    ForwardVanillaPathPricer, MonteCarloModel, PathGenerator, TimeGrid,
};
use bsm_processes::{BlackScholesMertonProcess, StochasticProcess};
use bsm_time::Date;

const DEFAULT_MAX_SAMPLES: Size = 2_000_000;

/// A lazy Monte Carlo pricing session for one forward-starting vanilla.
///
/// Exactly one of the total step count and the steps-per-year density must
/// be given, and exactly one stopping rule (sample count via
/// [`with_samples`][Self::with_samples], or target standard error via
/// [`with_tolerance`][Self::with_tolerance]) must be chosen before the
/// first accessor call.
#[derive(Debug)]
pub struct McForwardVanillaEngine {
    process: Arc<BlackScholesMertonProcess>,
    variant: OptionVariant,
    moneyness: Real,
    reset_time: Time,
    exercise_time: Time,
    steps: Size,
    brownian_bridge: bool,
    antithetic: bool,
    required_tolerance: Option<Real>,
    required_samples: Option<Size>,
    max_samples: Size,
    seed: BigNatural,
    state: LazyState,
    value: Cell<Real>,
    error_estimate: Cell<Real>,
}

impl McForwardVanillaEngine {
    /// Create a session for `variant` with the strike fixed at
    /// `reset_date` as `moneyness` times the underlying, exercised at
    /// `exercise_date`.
    ///
    /// Exactly one of `time_steps` (total steps between reset and
    /// exercise) and `steps_per_year` must be `Some`, and it must be
    /// positive.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        process: Arc<BlackScholesMertonProcess>,
        variant: OptionVariant,
        moneyness: Real,
        reset_date: Date,
        exercise_date: Date,
        time_steps: Option<Size>,
        steps_per_year: Option<Size>,
    ) -> Result<Self> {
        ensure!(moneyness > 0.0, "moneyness must be positive, got {moneyness}");
        let reset_time = process.time(reset_date);
        let exercise_time = process.time(exercise_date);
        ensure!(
            reset_time > 0.0,
            "reset date {reset_date} must fall after the process reference date {}",
            process.reference_date()
        );
        ensure!(
            exercise_time > reset_time,
            "exercise date {exercise_date} must fall after the reset date {reset_date}"
        );

        let steps = match (time_steps, steps_per_year) {
            (Some(n), None) => {
                ensure!(n > 0, "time step count must be positive");
                n
            }
            (None, Some(per_year)) => {
                ensure!(per_year > 0, "steps per year must be positive");
                let n = (per_year as Real * exercise_time) as Size;
                ensure!(
                    n > 0,
                    "{per_year} steps per year yield no steps over {exercise_time} years"
                );
                n
            }
            (Some(_), Some(_)) | (None, None) => {
                return Err(Error::InvalidArgument(
                    "exactly one of time steps and steps per year must be given".to_string(),
                ));
            }
        };

        Ok(Self {
            process,
            variant,
            moneyness,
            reset_time,
            exercise_time,
            steps,
            brownian_bridge: false,
            antithetic: false,
            required_tolerance: None,
            required_samples: None,
            max_samples: DEFAULT_MAX_SAMPLES,
            seed: 0,
            state: LazyState::new(),
            value: Cell::new(0.0),
            error_estimate: Cell::new(0.0),
        })
    }

    /// Build paths through a Brownian bridge instead of incrementally.
    pub fn with_brownian_bridge(mut self, enabled: bool) -> Self {
        self.brownian_bridge = enabled;
        self
    }

    /// Average each path with its antithetic companion.
    pub fn with_antithetic_variate(mut self, enabled: bool) -> Self {
        self.antithetic = enabled;
        self
    }

    /// Stop after a fixed number of samples.
    pub fn with_samples(mut self, samples: Size) -> Self {
        self.required_samples = Some(samples);
        self.required_tolerance = None;
        self
    }

    /// Stop once the standard error of the estimate drops to `tolerance`.
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.required_tolerance = Some(tolerance);
        self.required_samples = None;
        self
    }

    /// Cap the total number of samples under the tolerance rule.
    pub fn with_max_samples(mut self, max_samples: Size) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Seed the underlying Mersenne-Twister sequence generator.
    pub fn with_seed(mut self, seed: BigNatural) -> Self {
        self.seed = seed;
        self
    }

    /// The simulation time grid: `steps` reference steps spanning reset to
    /// exercise, with both dates landing exactly on grid points.
    pub fn time_grid(&self) -> Result<TimeGrid> {
        TimeGrid::with_mandatory_times(&[self.reset_time, self.exercise_time], self.steps)
    }

    /// Wire the path generator for this session's process and grid.
    pub fn path_generator(&self) -> Result<PathGenerator> {
        let grid = self.time_grid()?;
        let dimension = self.process.factors() * grid.steps();
        let sequence = GaussianSequenceGenerator::new(dimension, self.seed);
        let process: Arc<dyn bsm_processes::StochasticProcess1D> =
            Arc::clone(&self.process) as Arc<dyn bsm_processes::StochasticProcess1D>;
        PathGenerator::new(process, grid, sequence, self.brownian_bridge)
    }

    /// Present value.
    pub fn value(&self) -> Result<Real> {
        self.calculate()?;
        Ok(self.value.get())
    }

    /// Standard error of the Monte Carlo estimate.
    pub fn error_estimate(&self) -> Result<Real> {
        self.calculate()?;
        Ok(self.error_estimate.get())
    }
}

impl LazyObject for McForwardVanillaEngine {
    fn perform_calculations(&self) -> Result<()> {
        let generator = self.path_generator()?;
        let reset_index = generator
            .time_grid()
            .index_of(self.reset_time)
            .ok_or_else(|| {
                Error::Upstream("reset time missing from the simulation grid".to_string())
            })?;
        let discount = self.process.discount(self.exercise_time);
        let pricer =
            ForwardVanillaPathPricer::new(self.variant, self.moneyness, reset_index, discount)?;
        let mut model = MonteCarloModel::new(generator, pricer, self.antithetic);
        let statistics = model.sample(
            self.required_tolerance,
            self.required_samples,
            self.max_samples,
        )?;
        let value = statistics
            .mean()
            .ok_or_else(|| Error::Upstream("sampling produced no estimate".to_string()))?;
        let error = statistics
            .error_estimate()
            .ok_or_else(|| Error::Upstream("sampling produced no error estimate".to_string()))?;
        self.value.set(value);
        self.error_estimate.set(error);
        Ok(())
    }

    fn lazy_state(&self) -> &LazyState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european::black_scholes_merton;

    fn process() -> Arc<BlackScholesMertonProcess> {
        let reference = Date::from_ymd(2026, 1, 1).unwrap();
        Arc::new(BlackScholesMertonProcess::new(100.0, 0.05, 0.02, 0.2, reference).unwrap())
    }

    fn dates() -> (Date, Date) {
        (
            Date::from_ymd(2026, 7, 1).unwrap(),
            Date::from_ymd(2027, 1, 1).unwrap(),
        )
    }

    fn engine(variant: OptionVariant, moneyness: Real) -> McForwardVanillaEngine {
        let (reset, exercise) = dates();
        McForwardVanillaEngine::new(
            process(),
            variant,
            moneyness,
            reset,
            exercise,
            Some(24),
            None,
        )
        .unwrap()
        .with_antithetic_variate(true)
        .with_samples(100_000)
        .with_seed(42)
    }

    /// Closed-form forward-start value: the payoff is homogeneous in the
    /// reset fixing, so the price is `S·e^{−q·t1}` times a unit-spot
    /// vanilla struck at the moneyness over the remaining life.
    fn analytic_forward_start(variant: OptionVariant, moneyness: Real) -> Real {
        let p = process();
        let (reset, exercise) = dates();
        let t1 = p.time(reset);
        let tau = p.time(exercise) - t1;
        let unit = black_scholes_merton(
            variant,
            1.0,
            moneyness,
            p.risk_free_rate(),
            p.dividend_yield(),
            p.volatility(),
            tau,
        )
        .unwrap();
        p.spot() * (-p.dividend_yield() * t1).exp() * unit.value
    }

    #[test]
    fn grid_contains_both_fixing_dates() {
        let e = engine(OptionVariant::Call, 1.0);
        let grid = e.time_grid().unwrap();
        assert!(grid.index_of(e.reset_time).is_some());
        assert!(grid.index_of(e.exercise_time).is_some());
        assert_eq!(grid.last(), e.exercise_time);
    }

    #[test]
    fn estimate_matches_the_closed_form() {
        for (variant, moneyness) in [
            (OptionVariant::Call, 1.0),
            (OptionVariant::Put, 1.1),
            (OptionVariant::Straddle, 0.9),
        ] {
            let e = engine(variant, moneyness);
            let value = e.value().unwrap();
            let error = e.error_estimate().unwrap();
            let expected = analytic_forward_start(variant, moneyness);
            assert!(
                (value - expected).abs() < 4.0 * error.max(0.005),
                "{variant} m={moneyness}: estimate {value} vs {expected} (stderr {error})"
            );
        }
    }

    #[test]
    fn same_seed_reproduces_the_estimate() {
        let a = engine(OptionVariant::Call, 1.0).value().unwrap();
        let b = engine(OptionVariant::Call, 1.0).value().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bridged_paths_price_the_same_contract() {
        let plain = engine(OptionVariant::Call, 1.0);
        let bridged = engine(OptionVariant::Call, 1.0).with_brownian_bridge(true);
        let expected = analytic_forward_start(OptionVariant::Call, 1.0);
        for e in [plain, bridged] {
            let value = e.value().unwrap();
            let error = e.error_estimate().unwrap();
            assert!((value - expected).abs() < 4.0 * error.max(0.005));
        }
    }

    #[test]
    fn steps_per_year_densify_the_grid() {
        let (reset, exercise) = dates();
        let e = McForwardVanillaEngine::new(
            process(),
            OptionVariant::Call,
            1.0,
            reset,
            exercise,
            None,
            Some(52),
        )
        .unwrap();
        // 52 steps/year over one year of exercise time
        let grid = e.time_grid().unwrap();
        assert!(grid.steps() >= 52);
    }

    #[test]
    fn step_configuration_is_exclusive() {
        let (reset, exercise) = dates();
        let both = McForwardVanillaEngine::new(
            process(),
            OptionVariant::Call,
            1.0,
            reset,
            exercise,
            Some(12),
            Some(52),
        );
        assert!(matches!(both, Err(Error::InvalidArgument(_))));
        let neither = McForwardVanillaEngine::new(
            process(),
            OptionVariant::Call,
            1.0,
            reset,
            exercise,
            None,
            None,
        );
        assert!(matches!(neither, Err(Error::InvalidArgument(_))));
        let zero = McForwardVanillaEngine::new(
            process(),
            OptionVariant::Call,
            1.0,
            reset,
            exercise,
            Some(0),
            None,
        );
        assert!(matches!(zero, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn dates_out_of_order_are_rejected() {
        let (reset, exercise) = dates();
        let swapped = McForwardVanillaEngine::new(
            process(),
            OptionVariant::Call,
            1.0,
            exercise,
            reset,
            Some(12),
            None,
        );
        assert!(swapped.is_err());
        let reference = Date::from_ymd(2026, 1, 1).unwrap();
        let at_reference = McForwardVanillaEngine::new(
            process(),
            OptionVariant::Call,
            1.0,
            reference,
            exercise,
            Some(12),
            None,
        );
        assert!(at_reference.is_err());
    }

    #[test]
    fn missing_stopping_rule_is_rejected_lazily() {
        let (reset, exercise) = dates();
        let e = McForwardVanillaEngine::new(
            process(),
            OptionVariant::Call,
            1.0,
            reset,
            exercise,
            Some(12),
            None,
        )
        .unwrap();
        assert!(matches!(e.value(), Err(Error::InvalidArgument(_))));
        assert!(!e.is_calculated());
    }
}
