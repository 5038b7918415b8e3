//! # bsm-processes
//!
//! Stochastic process descriptors: the [`StochasticProcess`] /
//! [`StochasticProcess1D`] traits consumed by the path generator, and the
//! [`BlackScholesMertonProcess`] used by both pricing engines.
//!
//! Process descriptors are shared by reference (`Arc`) across pricing
//! sessions and are never mutated after construction.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Base traits for stochastic processes.
pub mod stochastic_process;

/// Black-Scholes-Merton process with flat parameters.
pub mod black_scholes;

pub use black_scholes::BlackScholesMertonProcess;
pub use stochastic_process::{StochasticProcess, StochasticProcess1D};
