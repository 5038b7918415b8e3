//! Standard normal distribution helpers, delegating to the `statrs` crate's
//! error-function implementations.

use bsm_core::Real;
use statrs::function::erf::{erf_inv, erfc};
use std::f64::consts::{PI, SQRT_2};

/// The standard normal probability density function.
///
/// `φ(x) = exp(-x²/2) / √(2π)`
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// The standard normal cumulative distribution function Φ(x).
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x / SQRT_2)
}

/// The inverse standard normal CDF (probit function).
///
/// `p` must lie strictly inside (0, 1).
#[inline]
pub fn normal_cdf_inverse(p: Real) -> Real {
    debug_assert!(p > 0.0 && p < 1.0, "p must be in (0, 1), got {p}");
    SQRT_2 * erf_inv(2.0 * p - 1.0)
}
