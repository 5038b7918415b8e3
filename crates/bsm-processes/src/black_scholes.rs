//! Black-Scholes-Merton process with flat parameters.
//!
//! `dS/S = (r − q) dt + σ dW`
//!
//! The flat-parameter special case is all the vanilla engines need; the
//! process also carries the reference date and day counter that turn
//! contract dates into model time.

use crate::stochastic_process::{StochasticProcess, StochasticProcess1D};
use bsm_core::{ensure, Rate, Real, Result, Size, Time, Volatility};
use bsm_time::{Actual365Fixed, Date, DayCounter};
use std::sync::Arc;

/// A Black-Scholes-Merton process with constant rate, dividend yield, and
/// volatility.
#[derive(Debug, Clone)]
pub struct BlackScholesMertonProcess {
    x0: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    reference_date: Date,
    day_counter: Arc<dyn DayCounter>,
}

impl BlackScholesMertonProcess {
    /// Create a new process.
    ///
    /// `x0` (spot) and `volatility` must be strictly positive.  Model time
    /// is measured from `reference_date` with Actual/365 (Fixed); use
    /// [`with_day_counter`][Self::with_day_counter] to change the
    /// convention.
    pub fn new(
        x0: Real,
        risk_free_rate: Rate,
        dividend_yield: Rate,
        volatility: Volatility,
        reference_date: Date,
    ) -> Result<Self> {
        ensure!(x0 > 0.0, "spot must be positive, got {x0}");
        ensure!(
            volatility > 0.0,
            "volatility must be positive, got {volatility}"
        );
        Ok(Self {
            x0,
            risk_free_rate,
            dividend_yield,
            volatility,
            reference_date,
            day_counter: Arc::new(Actual365Fixed),
        })
    }

    /// Replace the day-count convention used for the time mapping.
    pub fn with_day_counter(mut self, day_counter: Arc<dyn DayCounter>) -> Self {
        self.day_counter = day_counter;
        self
    }

    /// The spot price.
    pub fn spot(&self) -> Real {
        self.x0
    }

    /// The flat risk-free rate.
    pub fn risk_free_rate(&self) -> Rate {
        self.risk_free_rate
    }

    /// The flat dividend yield.
    pub fn dividend_yield(&self) -> Rate {
        self.dividend_yield
    }

    /// The flat volatility.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// The reference date model time is measured from.
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Discount factor `exp(−r·t)` for model time `t`.
    pub fn discount(&self, t: Time) -> Real {
        (-self.risk_free_rate * t).exp()
    }
}

impl StochasticProcess for BlackScholesMertonProcess {
    fn size(&self) -> Size {
        1
    }

    fn factors(&self) -> Size {
        1
    }

    fn time(&self, date: Date) -> Time {
        self.day_counter.year_fraction(self.reference_date, date)
    }
}

impl StochasticProcess1D for BlackScholesMertonProcess {
    fn x0(&self) -> Real {
        self.x0
    }

    fn drift(&self, _t: Time, x: Real) -> Real {
        (self.risk_free_rate - self.dividend_yield) * x
    }

    fn diffusion(&self, _t: Time, x: Real) -> Real {
        self.volatility * x
    }

    /// Exact lognormal step:
    /// `x · exp((r − q − σ²/2)·Δt + σ·√Δt·dw)`.
    fn evolve(&self, _t: Time, x: Real, dt: Time, dw: Real) -> Real {
        let sigma = self.volatility;
        let nu = self.risk_free_rate - self.dividend_yield - 0.5 * sigma * sigma;
        x * (nu * dt + sigma * dt.sqrt() * dw).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn process() -> BlackScholesMertonProcess {
        let ref_date = Date::from_ymd(2025, 1, 15).unwrap();
        BlackScholesMertonProcess::new(100.0, 0.05, 0.02, 0.20, ref_date).unwrap()
    }

    #[test]
    fn rejects_non_positive_inputs() {
        let ref_date = Date::from_ymd(2025, 1, 15).unwrap();
        assert!(BlackScholesMertonProcess::new(0.0, 0.05, 0.0, 0.2, ref_date).is_err());
        assert!(BlackScholesMertonProcess::new(100.0, 0.05, 0.0, 0.0, ref_date).is_err());
        assert!(BlackScholesMertonProcess::new(100.0, 0.05, 0.0, -0.2, ref_date).is_err());
    }

    #[test]
    fn exact_step_is_lognormal() {
        let p = process();
        // zero noise: pure drift at ν = r − q − σ²/2 = 0.01
        let x = p.evolve(0.0, 100.0, 1.0, 0.0);
        assert_relative_eq!(x, 100.0 * (0.01_f64).exp(), epsilon = 1e-12);
        // one-sigma shock
        let x = p.evolve(0.0, 100.0, 1.0, 1.0);
        assert_relative_eq!(x, 100.0 * (0.01_f64 + 0.20).exp(), epsilon = 1e-12);
    }

    #[test]
    fn evolution_stays_positive() {
        let p = process();
        let mut x = 100.0;
        for i in 0..100 {
            let dw = if i % 2 == 0 { -3.0 } else { 2.5 };
            x = p.evolve(0.0, x, 0.01, dw);
            assert!(x > 0.0);
        }
    }

    #[test]
    fn time_mapping_is_actual_365() {
        let p = process();
        let exercise = Date::from_ymd(2026, 1, 15).unwrap();
        assert_relative_eq!(p.time(exercise), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn discounting_uses_the_flat_rate() {
        let p = process();
        assert_relative_eq!(p.discount(2.0), (-0.10_f64).exp(), epsilon = 1e-14);
    }
}
