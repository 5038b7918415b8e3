//! Tridiagonal operators and the Black-Scholes-Merton spatial operator.

use bsm_core::{ensure, Rate, Real, Result, Size, Volatility};
use bsm_math::Array;

use super::grid::LogGrid;

/// A boundary condition attached to one end of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// Fixes the difference between the two outermost values.
    Neumann(Real),
    /// Fixes the outermost value itself.
    Dirichlet(Real),
}

/// A tridiagonal linear operator over grid-aligned value vectors.
///
/// `lower[i]`, `diag[i]`, `upper[i]` hold row `i`'s sub-diagonal, diagonal,
/// and super-diagonal entries; `lower[0]` and `upper[n-1]` are unused.
#[derive(Debug, Clone)]
pub struct TridiagonalOperator {
    /// Sub-diagonal entries.
    pub lower: Vec<Real>,
    /// Diagonal entries.
    pub diag: Vec<Real>,
    /// Super-diagonal entries.
    pub upper: Vec<Real>,
}

impl TridiagonalOperator {
    /// A zero operator of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            lower: vec![0.0; size],
            diag: vec![0.0; size],
            upper: vec![0.0; size],
        }
    }

    /// Number of rows.
    pub fn size(&self) -> Size {
        self.diag.len()
    }

    /// Set every interior row to `(lower, diag, upper)`.
    pub fn set_mid_rows(&mut self, lower: Real, diag: Real, upper: Real) {
        for i in 1..self.size() - 1 {
            self.lower[i] = lower;
            self.diag[i] = diag;
            self.upper[i] = upper;
        }
    }

    /// Set the first row to `(diag, upper)`.
    pub fn set_first_row(&mut self, diag: Real, upper: Real) {
        self.diag[0] = diag;
        self.upper[0] = upper;
    }

    /// Set the last row to `(lower, diag)`.
    pub fn set_last_row(&mut self, lower: Real, diag: Real) {
        let n = self.size() - 1;
        self.lower[n] = lower;
        self.diag[n] = diag;
    }

    /// Apply the operator: `result = L · v`.
    pub fn apply(&self, v: &[Real]) -> Vec<Real> {
        assert_eq!(v.len(), self.size(), "operator/vector size mismatch");
        let n = self.size();
        let mut result = vec![0.0; n];
        result[0] = self.diag[0] * v[0] + self.upper[0] * v[1];
        for i in 1..n - 1 {
            result[i] = self.lower[i] * v[i - 1] + self.diag[i] * v[i] + self.upper[i] * v[i + 1];
        }
        result[n - 1] = self.lower[n - 1] * v[n - 2] + self.diag[n - 1] * v[n - 1];
        result
    }

    /// Solve `L · x = rhs` by the Thomas algorithm.
    pub fn solve(&self, rhs: &[Real]) -> Vec<Real> {
        assert_eq!(rhs.len(), self.size(), "operator/vector size mismatch");
        let n = self.size();
        let mut c_prime = vec![0.0; n];
        let mut d_prime = vec![0.0; n];
        let mut bet = self.diag[0];
        assert!(bet != 0.0, "singular tridiagonal system");
        d_prime[0] = rhs[0] / bet;
        for i in 1..n {
            c_prime[i] = self.upper[i - 1] / bet;
            bet = self.diag[i] - self.lower[i] * c_prime[i];
            assert!(bet != 0.0, "singular tridiagonal system");
            d_prime[i] = (rhs[i] - self.lower[i] * d_prime[i - 1]) / bet;
        }
        let mut x = d_prime;
        for i in (0..n - 1).rev() {
            let next = x[i + 1];
            x[i] -= c_prime[i + 1] * next;
        }
        x
    }
}

/// The discrete Black-Scholes-Merton spatial operator on a uniform
/// log-price grid with spacing `log_spacing`.
///
/// With `ν = r − q − σ²/2`, the interior rows discretize
/// `L v = −ν v_x − σ²/2 v_xx + r v`, so that `v_t = L v` marched from the
/// terminal payoff towards the valuation date recovers the option value.
/// The first and last rows are left zero; boundary conditions overwrite
/// them.
pub fn bsm_operator(
    size: Size,
    log_spacing: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
) -> TridiagonalOperator {
    let dx = log_spacing;
    let sigma2 = volatility * volatility;
    let nu = risk_free_rate - dividend_yield - sigma2 / 2.0;
    let pd = -(sigma2 / dx - nu) / (2.0 * dx);
    let pm = sigma2 / (dx * dx) + risk_free_rate;
    let pu = -(sigma2 / dx + nu) / (2.0 * dx);
    let mut op = TridiagonalOperator::new(size);
    op.set_mid_rows(pd, pm, pu);
    op
}

/// The assembled spatial operator together with its boundary conditions.
#[derive(Debug, Clone)]
pub struct FdOperator {
    /// Interior discretization of the pricing PDE.
    pub tridiagonal: TridiagonalOperator,
    /// Condition at the lowest grid point.
    pub lower_bc: BoundaryCondition,
    /// Condition at the highest grid point.
    pub upper_bc: BoundaryCondition,
}

/// Assemble the Black-Scholes-Merton operator for `grid` with Neumann
/// boundary values read off the edge slopes of the sampled payoff.
///
/// The lower condition fixes `v[1] − v[0]` to the payoff's first
/// difference, the upper one fixes `v[n−1] − v[n−2]` to its last; this
/// keeps the payoff's asymptotic slope at both ends during the rollback.
pub fn assemble_operator(
    grid: &LogGrid,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    initial_condition: &Array,
) -> Result<FdOperator> {
    let n = grid.len();
    ensure!(
        initial_condition.len() == n,
        "initial condition has {} points but the grid has {n}",
        initial_condition.len()
    );
    ensure!(
        volatility > 0.0,
        "volatility must be positive, got {volatility}"
    );
    let tridiagonal = bsm_operator(
        n,
        grid.log_spacing(),
        risk_free_rate,
        dividend_yield,
        volatility,
    );
    let lower_bc = BoundaryCondition::Neumann(initial_condition[1] - initial_condition[0]);
    let upper_bc = BoundaryCondition::Neumann(initial_condition[n - 1] - initial_condition[n - 2]);
    Ok(FdOperator {
        tridiagonal,
        lower_bc,
        upper_bc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finite_differences::{grid_bounds, LogGrid};
    use approx::assert_relative_eq;
    use bsm_instruments::OptionVariant;

    #[test]
    fn apply_and_solve_are_inverse() {
        let mut op = TridiagonalOperator::new(5);
        op.set_first_row(2.0, -1.0);
        op.set_mid_rows(-1.0, 2.0, -1.0);
        op.set_last_row(-1.0, 2.0);
        let x = vec![1.0, 2.0, 0.5, -1.0, 3.0];
        let b = op.apply(&x);
        let x_back = op.solve(&b);
        for (a, e) in x_back.iter().zip(&x) {
            assert_relative_eq!(a, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn bsm_operator_annihilates_discounted_growth() {
        // v(x) = e^x is an eigenvector of the interior rows:
        // L e^x = (r − (r − q)) e^x up to O(dx²), so with q = 0 the drift
        // and discount terms cancel against a forward-growing payoff.
        let (r, q, sigma) = (0.05, 0.0, 0.2);
        let dx = 0.01;
        let op = bsm_operator(7, dx, r, q, sigma);
        let xs: Vec<Real> = (0..7).map(|i| i as Real * dx).collect();
        let v: Vec<Real> = xs.iter().map(|&x| x.exp()).collect();
        let lv = op.apply(&v);
        for i in 1..6 {
            assert_relative_eq!(lv[i] / v[i], 0.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn interior_coefficients_sum_to_the_discount_rate() {
        // the diffusion and drift terms cancel row-wise, leaving the
        // discount: a constant vector decays at rate r.
        let (r, q, sigma) = (0.05, 0.02, 0.2);
        let dx = 0.05;
        let op = bsm_operator(5, dx, r, q, sigma);
        let sum = op.lower[2] + op.diag[2] + op.upper[2];
        assert_relative_eq!(sum, r, epsilon = 1e-12);
    }

    fn payoff_boundaries(variant: OptionVariant) -> (Real, Real) {
        let bounds = grid_bounds(100.0, 100.0, 0.2, 1.0).unwrap();
        let grid = LogGrid::new(bounds, 101).unwrap();
        let payoff = grid.sample(|s| variant.payoff(s, 100.0));
        let op = assemble_operator(&grid, 0.05, 0.0, 0.2, &payoff).unwrap();
        let lower = match op.lower_bc {
            BoundaryCondition::Neumann(v) => v,
            BoundaryCondition::Dirichlet(v) => v,
        };
        let upper = match op.upper_bc {
            BoundaryCondition::Neumann(v) => v,
            BoundaryCondition::Dirichlet(v) => v,
        };
        let n = payoff.len();
        assert_eq!(lower, payoff[1] - payoff[0]);
        assert_eq!(upper, payoff[n - 1] - payoff[n - 2]);
        (lower, upper)
    }

    #[test]
    fn call_boundaries_are_flat_below_and_rising_above() {
        let (lower, upper) = payoff_boundaries(OptionVariant::Call);
        assert_eq!(lower, 0.0);
        assert!(upper > 0.0);
    }

    #[test]
    fn put_boundaries_are_falling_below_and_flat_above() {
        let (lower, upper) = payoff_boundaries(OptionVariant::Put);
        assert!(lower < 0.0);
        assert_eq!(upper, 0.0);
    }

    #[test]
    fn straddle_boundaries_fall_below_and_rise_above() {
        let (lower, upper) = payoff_boundaries(OptionVariant::Straddle);
        assert!(lower < 0.0);
        assert!(upper > 0.0);
    }

    #[test]
    fn assembly_rejects_mismatched_payoff() {
        let bounds = grid_bounds(100.0, 100.0, 0.2, 1.0).unwrap();
        let grid = LogGrid::new(bounds, 101).unwrap();
        let short = Array::zeros(50);
        assert!(assemble_operator(&grid, 0.05, 0.0, 0.2, &short).is_err());
    }
}
