//! Finite difference methods for PDE-based option pricing.
//!
//! The pipeline prepares a 1-D backward PDE problem on the option's
//! log-price axis and rolls it back to the valuation date:
//!
//! 1. [`grid_bounds`] — a price interval containing spot and strike with
//!    adequate tail coverage, spot log-centered;
//! 2. [`LogGrid`] — the interval discretized into a geometric progression;
//! 3. payoff sampling over the grid ([`LogGrid::sample`]);
//! 4. [`assemble_operator`] — the spatial Black-Scholes-Merton operator
//!    with Neumann boundaries read off the payoff's edge slopes;
//! 5. [`CrankNicolsonStepper`] — the rollback, behind the [`PdeStepper`]
//!    seam.
//!
//! Greeks are read off the rolled-back vector at the grid center with the
//! `*_at_center` helpers; the spot sits exactly at the center because the
//! bounds are log-symmetric around it.

use bsm_core::{ensure, Real, Result};
use bsm_math::Array;

mod grid;
mod operator;
mod stepper;

pub use grid::{grid_bounds, GridBounds, LogGrid, SAFETY_ZONE_FACTOR};
pub use operator::{
    assemble_operator, bsm_operator, BoundaryCondition, FdOperator, TridiagonalOperator,
};
pub use stepper::{CrankNicolsonStepper, FdProblem, PdeStepper};

/// Value of a grid-sampled function at the grid center.
///
/// For an even number of points, the average of the two middle values.
pub fn value_at_center(values: &Array) -> Result<Real> {
    ensure!(!values.is_empty(), "cannot sample an empty value vector");
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Ok(values[mid])
    } else {
        Ok(0.5 * (values[mid] + values[mid - 1]))
    }
}

/// First derivative of a grid-sampled function at the grid center, using
/// the central (odd point count) or one-sided (even) difference.
pub fn first_derivative_at_center(values: &Array, prices: &Array) -> Result<Real> {
    ensure!(
        values.len() == prices.len(),
        "value and price vectors must have the same length"
    );
    ensure!(
        values.len() >= 3,
        "need at least 3 points for a first derivative, got {}",
        values.len()
    );
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Ok((values[mid + 1] - values[mid - 1]) / (prices[mid + 1] - prices[mid - 1]))
    } else {
        Ok((values[mid] - values[mid - 1]) / (prices[mid] - prices[mid - 1]))
    }
}

/// Second derivative of a grid-sampled function at the grid center, from
/// the difference of one-sided slopes on the non-uniform price grid.
pub fn second_derivative_at_center(values: &Array, prices: &Array) -> Result<Real> {
    ensure!(
        values.len() == prices.len(),
        "value and price vectors must have the same length"
    );
    ensure!(
        values.len() >= 4,
        "need at least 4 points for a second derivative, got {}",
        values.len()
    );
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        let delta_plus = (values[mid + 1] - values[mid]) / (prices[mid + 1] - prices[mid]);
        let delta_minus = (values[mid] - values[mid - 1]) / (prices[mid] - prices[mid - 1]);
        let ds = 0.5 * (prices[mid + 1] - prices[mid - 1]);
        Ok((delta_plus - delta_minus) / ds)
    } else {
        let delta_plus = (values[mid + 1] - values[mid - 1]) / (prices[mid + 1] - prices[mid - 1]);
        let delta_minus = (values[mid] - values[mid - 2]) / (prices[mid] - prices[mid - 2]);
        Ok((delta_plus - delta_minus) / (prices[mid] - prices[mid - 1]))
    }
}
