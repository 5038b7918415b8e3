//! Finite-difference pricing session for plain European vanillas.

use std::cell::Cell;

use bsm_core::{ensure, Error, LazyObject, LazyState, Real, Result, Size, Volatility};
use bsm_instruments::OptionSpec;
use bsm_methods::finite_differences::{
    assemble_operator, first_derivative_at_center, grid_bounds, second_derivative_at_center,
    value_at_center, CrankNicolsonStepper, FdProblem, LogGrid, PdeStepper,
};

/// Admissible volatility range for the finite-difference discretization.
///
/// Outside the band the grid either degenerates (the diffusion cone
/// collapses onto the spot) or blows up (the bounds span too many orders of
/// magnitude for the point count); the engine refuses such inputs with
/// [`Error::NumericalInstability`] rather than silently clamping them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityBand {
    /// Smallest admissible volatility.
    pub floor: Volatility,
    /// Largest admissible volatility.
    pub ceiling: Volatility,
}

impl Default for VolatilityBand {
    fn default() -> Self {
        Self {
            floor: 0.0005,
            ceiling: 3.0,
        }
    }
}

impl VolatilityBand {
    fn check(&self, volatility: Volatility) -> Result<()> {
        if volatility < self.floor || volatility > self.ceiling {
            return Err(Error::NumericalInstability(format!(
                "volatility {volatility} outside the admissible band [{}, {}]",
                self.floor, self.ceiling
            )));
        }
        Ok(())
    }
}

/// A lazy finite-difference pricing session for one European option.
///
/// Construction validates the inputs; the first accessor call runs the full
/// pipeline (grid bounds, log-spaced grid, payoff, operator assembly,
/// Crank-Nicolson rollback, center sampling) and caches value, delta,
/// gamma, and theta.  A session is single-threaded by construction: the
/// cache lives in `Cell`s, so the type is `!Sync`.
#[derive(Debug)]
pub struct FdVanillaEngine {
    spec: OptionSpec,
    grid_points: Size,
    stepper: Box<dyn PdeStepper>,
    band: VolatilityBand,
    state: LazyState,
    value: Cell<Real>,
    delta: Cell<Real>,
    gamma: Cell<Real>,
    theta: Cell<Real>,
}

impl FdVanillaEngine {
    /// A session over `grid_points` price points, rolled back by a
    /// Crank-Nicolson stepper taking `time_steps` steps.
    pub fn new(spec: OptionSpec, grid_points: Size, time_steps: Size) -> Result<Self> {
        let stepper = CrankNicolsonStepper::new(time_steps)?;
        Self::with_stepper(spec, grid_points, Box::new(stepper))
    }

    /// A session using a caller-supplied rollback strategy.
    pub fn with_stepper(
        spec: OptionSpec,
        grid_points: Size,
        stepper: Box<dyn PdeStepper>,
    ) -> Result<Self> {
        ensure!(
            grid_points >= 4,
            "need at least 4 grid points, got {grid_points}"
        );
        Ok(Self {
            spec,
            grid_points,
            stepper,
            band: VolatilityBand::default(),
            state: LazyState::new(),
            value: Cell::new(0.0),
            delta: Cell::new(0.0),
            gamma: Cell::new(0.0),
            theta: Cell::new(0.0),
        })
    }

    /// Replace the admissible volatility band.
    pub fn with_volatility_band(mut self, band: VolatilityBand) -> Self {
        self.band = band;
        self
    }

    /// The option being priced.
    pub fn spec(&self) -> &OptionSpec {
        &self.spec
    }

    /// Present value.
    pub fn value(&self) -> Result<Real> {
        self.calculate()?;
        Ok(self.value.get())
    }

    /// Sensitivity to the spot price.
    pub fn delta(&self) -> Result<Real> {
        self.calculate()?;
        Ok(self.delta.get())
    }

    /// Second-order sensitivity to the spot price.
    pub fn gamma(&self) -> Result<Real> {
        self.calculate()?;
        Ok(self.gamma.get())
    }

    /// Sensitivity to the passage of time, per year.
    pub fn theta(&self) -> Result<Real> {
        self.calculate()?;
        Ok(self.theta.get())
    }
}

impl LazyObject for FdVanillaEngine {
    fn perform_calculations(&self) -> Result<()> {
        let spec = &self.spec;
        self.band.check(spec.volatility)?;

        let bounds = grid_bounds(
            spec.spot,
            spec.strike,
            spec.volatility,
            spec.residual_time,
        )?;
        let grid = LogGrid::new(bounds, self.grid_points)?;
        let payoff = grid.sample(|s| spec.payoff(s));
        let operator = assemble_operator(
            &grid,
            spec.risk_free_rate,
            spec.dividend_yield,
            spec.volatility,
            &payoff,
        )?;
        let problem = FdProblem {
            grid: &grid,
            initial_condition: &payoff,
            operator: &operator,
            residual_time: spec.residual_time,
            step_condition: None,
        };
        let values = self.stepper.rollback(&problem)?;

        let prices = grid.points();
        let value = value_at_center(&values)?;
        let delta = first_derivative_at_center(&values, prices)?;
        let gamma = second_derivative_at_center(&values, prices)?;
        // the pricing PDE itself, solved for the time derivative
        let theta = spec.risk_free_rate * value
            - (spec.risk_free_rate - spec.dividend_yield) * spec.spot * delta
            - 0.5 * spec.volatility * spec.volatility * spec.spot * spec.spot * gamma;

        self.value.set(value);
        self.delta.set(delta);
        self.gamma.set(gamma);
        self.theta.set(theta);
        Ok(())
    }

    fn lazy_state(&self) -> &LazyState {
        &self.state
    }
}
