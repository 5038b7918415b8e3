//! # bsm-math
//!
//! Numeric building blocks consumed by the pricing engines: the [`Array`]
//! vector type, standard-normal distribution helpers, the Mersenne-Twister
//! Gaussian sequence generator, the incremental [`Statistics`] accumulator,
//! and Brownian-bridge path construction.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// One-dimensional vector of reals.
pub mod array;

/// Standard normal distribution helpers.
pub mod distributions;

/// Random number and random sequence generators.
pub mod random_numbers;

/// Incremental statistics accumulator.
pub mod statistics;

pub use array::Array;
pub use random_numbers::{GaussianSequenceGenerator, MersenneTwisterUniformRng};
pub use statistics::Statistics;
