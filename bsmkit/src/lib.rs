//! # bsmkit
//!
//! Finite-difference and Monte Carlo pricing of European options under
//! Black-Scholes-Merton dynamics.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `bsm-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use bsmkit::engines::FdVanillaEngine;
//! use bsmkit::instruments::{OptionSpec, OptionVariant};
//!
//! # fn main() -> bsmkit::core::Result<()> {
//! let spec = OptionSpec::new(OptionVariant::Call, 100.0, 100.0, 0.0, 0.05, 1.0, 0.20)?;
//! let engine = FdVanillaEngine::new(spec, 101, 200)?;
//! let value = engine.value()?;
//! assert!((value - 10.45).abs() < 0.05);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions, and the lazy-session protocol.
pub use bsm_core as core;

/// Dates and day-count conventions.
pub use bsm_time as time;

/// Mathematical utilities: arrays, distributions, RNG, statistics.
pub use bsm_math as math;

/// Stochastic process definitions.
pub use bsm_processes as processes;

/// Option descriptors.
pub use bsm_instruments as instruments;

/// Numerical methods (finite differences, Monte Carlo).
pub use bsm_methods as methods;

/// Pricing engines.
pub use bsm_engines as engines;
