//! Base traits for stochastic processes.
//!
//! A process `dX = μ(t,X) dt + σ(t,X) dW` is described by its drift,
//! diffusion, and an evolution step.  The base trait also carries the
//! calendar-date → model-time mapping the simulation engines use to place
//! fixing dates on the time grid.

use bsm_core::{Real, Size, Time};
use bsm_time::Date;

/// A general stochastic process descriptor.
pub trait StochasticProcess: std::fmt::Debug + Send + Sync {
    /// Number of state dimensions.
    fn size(&self) -> Size;

    /// Number of independent Brownian motions driving the process.
    fn factors(&self) -> Size {
        self.size()
    }

    /// Map a calendar date to model time (years from the process's
    /// reference date).
    fn time(&self, date: Date) -> Time;
}

/// A 1-dimensional stochastic process `dX = μ(t,X) dt + σ(t,X) dW`.
pub trait StochasticProcess1D: StochasticProcess {
    /// Initial value of the process.
    fn x0(&self) -> Real;

    /// Drift `μ(t, x)`.
    fn drift(&self, t: Time, x: Real) -> Real;

    /// Diffusion `σ(t, x)`.
    fn diffusion(&self, t: Time, x: Real) -> Real;

    /// Expected value `E[x(t+Δt) | x(t) = x]`.
    ///
    /// Default: first-order Euler `x + μ(t,x)·Δt`.
    fn expectation(&self, t: Time, x: Real, dt: Time) -> Real {
        x + self.drift(t, x) * dt
    }

    /// Standard deviation over `Δt`: `σ(t,x) · √Δt`.
    fn std_deviation(&self, t: Time, x: Real, dt: Time) -> Real {
        self.diffusion(t, x) * dt.sqrt()
    }

    /// Advance the state by one step given a standard-normal deviate `dw`.
    ///
    /// Default: Euler step `E[x(t+Δt)] + σ·√Δt · dw`.  Processes with a
    /// known transition law (e.g. lognormal) override this with the exact
    /// step.
    fn evolve(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        self.expectation(t, x, dt) + self.std_deviation(t, x, dt) * dw
    }
}
