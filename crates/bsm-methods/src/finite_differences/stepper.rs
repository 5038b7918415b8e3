//! The backward rollback from the terminal payoff to the valuation date.

use bsm_core::{ensure, Real, Result, Size};
use bsm_math::Array;
use bsm_instruments::StepCondition;

use super::grid::LogGrid;
use super::operator::{BoundaryCondition, FdOperator, TridiagonalOperator};

/// A fully-assembled backward PDE problem, ready to be rolled back.
#[derive(Debug)]
pub struct FdProblem<'a> {
    /// The log-spaced price grid.
    pub grid: &'a LogGrid,
    /// Terminal condition sampled over the grid (the payoff).
    pub initial_condition: &'a Array,
    /// Spatial operator and boundary conditions.
    pub operator: &'a FdOperator,
    /// Time from the valuation date to exercise, in years.
    pub residual_time: Real,
    /// Optional constraint applied after every time step.
    pub step_condition: Option<&'a dyn StepCondition>,
}

/// Strategy for rolling a PDE problem back in time.
pub trait PdeStepper: std::fmt::Debug {
    /// Roll `problem` back over its full residual time and return the
    /// value vector at the valuation date.
    fn rollback(&self, problem: &FdProblem<'_>) -> Result<Array>;
}

/// Crank-Nicolson rollback: unconditionally stable, second order in time.
///
/// Each step solves `(I + dt/2 L) v_new = (I − dt/2 L) v_old` with the
/// boundary rows replaced by the problem's boundary conditions.
#[derive(Debug, Clone, Copy)]
pub struct CrankNicolsonStepper {
    time_steps: Size,
}

impl CrankNicolsonStepper {
    /// A stepper taking `time_steps` uniform steps over the residual time.
    pub fn new(time_steps: Size) -> Result<Self> {
        ensure!(time_steps > 0, "need at least one time step");
        Ok(Self { time_steps })
    }

    /// Number of time steps per rollback.
    pub fn time_steps(&self) -> Size {
        self.time_steps
    }
}

impl PdeStepper for CrankNicolsonStepper {
    fn rollback(&self, problem: &FdProblem<'_>) -> Result<Array> {
        let n = problem.grid.len();
        ensure!(
            problem.initial_condition.len() == n && problem.operator.tridiagonal.size() == n,
            "grid, payoff, and operator sizes disagree"
        );
        ensure!(
            problem.residual_time > 0.0,
            "residual time must be positive, got {}",
            problem.residual_time
        );

        let dt = problem.residual_time / self.time_steps as Real;
        let l = &problem.operator.tridiagonal;

        // implicit-side operator, boundary rows included; it does not
        // change between steps
        let mut lhs = TridiagonalOperator::new(n);
        for i in 0..n {
            lhs.lower[i] = 0.5 * dt * l.lower[i];
            lhs.diag[i] = 1.0 + 0.5 * dt * l.diag[i];
            lhs.upper[i] = 0.5 * dt * l.upper[i];
        }
        match problem.operator.lower_bc {
            // v[0] − v[1] = −value, i.e. the first difference is pinned
            BoundaryCondition::Neumann(_) => lhs.set_first_row(1.0, -1.0),
            BoundaryCondition::Dirichlet(_) => lhs.set_first_row(1.0, 0.0),
        }
        match problem.operator.upper_bc {
            BoundaryCondition::Neumann(_) => lhs.set_last_row(-1.0, 1.0),
            BoundaryCondition::Dirichlet(_) => lhs.set_last_row(0.0, 1.0),
        }

        let mut values = problem.initial_condition.as_slice().to_vec();
        for step in 0..self.time_steps {
            let lv = l.apply(&values);
            let mut rhs: Vec<Real> = values
                .iter()
                .zip(&lv)
                .map(|(&v, &lv)| v - 0.5 * dt * lv)
                .collect();
            rhs[0] = match problem.operator.lower_bc {
                BoundaryCondition::Neumann(value) => -value,
                BoundaryCondition::Dirichlet(value) => value,
            };
            rhs[n - 1] = match problem.operator.upper_bc {
                BoundaryCondition::Neumann(value) => value,
                BoundaryCondition::Dirichlet(value) => value,
            };
            values = lhs.solve(&rhs);
            if let Some(condition) = problem.step_condition {
                let t = problem.residual_time - (step + 1) as Real * dt;
                condition.apply(t, &mut values, problem.grid.as_slice());
            }
        }
        Ok(Array::from_vec(values))
    }
}
