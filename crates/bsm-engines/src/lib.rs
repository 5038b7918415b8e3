//! # bsm-engines
//!
//! Pricing engines for European options under Black-Scholes-Merton:
//!
//! * [`FdVanillaEngine`] — finite-difference pricing session for plain
//!   calls, puts, and straddles, with delta, gamma, and theta read off the
//!   grid;
//! * [`McForwardVanillaEngine`] — Monte Carlo session for forward-starting
//!   vanillas whose strike is fixed at a future reset date;
//! * [`black_scholes_merton`] — the closed-form reference both numerical
//!   engines are validated against.
//!
//! Engines follow the lazy pricing-session protocol of
//! [`bsm_core::LazyObject`]: construction validates inputs, the first
//! result accessor triggers the full calculation, and later accessors are
//! served from the cache.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Closed-form Black-Scholes-Merton values and Greeks.
pub mod analytic_european;

/// Finite-difference pricing session for plain vanillas.
pub mod fd_vanilla_engine;

/// Monte Carlo pricing session for forward-starting vanillas.
pub mod mc_forward_vanilla_engine;

pub use analytic_european::{black_scholes_merton, EuropeanResults};
pub use fd_vanilla_engine::{FdVanillaEngine, VolatilityBand};
pub use mc_forward_vanilla_engine::McForwardVanillaEngine;
