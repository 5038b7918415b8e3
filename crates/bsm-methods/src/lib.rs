//! # bsm-methods
//!
//! The two numerical engines behind the pricing sessions:
//!
//! * [`finite_differences`] — price-grid construction, payoff
//!   initialization, Black-Scholes-Merton operator assembly with
//!   payoff-slope Neumann boundaries, and the Crank-Nicolson rollback.
//! * [`monte_carlo`] — simulation time grids with mandatory fixing dates,
//!   path generation (optionally Brownian-bridged and antithetic), path
//!   pricers, and the sampling driver.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Finite difference methods for PDE-based option pricing.
pub mod finite_differences;

/// Monte Carlo simulation framework.
pub mod monte_carlo;
