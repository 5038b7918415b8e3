//! Error types for bsmkit.
//!
//! All validation happens eagerly at the boundary of the offending component:
//! no partial grid, operator, or time grid is ever handed downstream.  Errors
//! from the PDE stepper or the sampling driver are propagated unchanged; the
//! library never retries.

use thiserror::Error;

/// The top-level error type used throughout bsmkit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A caller-supplied argument is outside its contract (non-positive
    /// volatility or residual time, unknown option variant tag, malformed
    /// time-step request, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Inputs would produce a degenerate or excessively wide discretisation
    /// (e.g. a volatility outside the configured floor/ceiling band).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// A failure surfaced by an external collaborator (PDE stepper, sampling
    /// driver).  Not caught or retried; the lazy cache stays uncomputed.
    #[error("upstream failure: {0}")]
    Upstream(String),
}

/// Shorthand `Result` type used throughout bsmkit.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fail fast with [`Error::InvalidArgument`] when a precondition is violated.
///
/// # Example
/// ```
/// use bsm_core::ensure;
/// fn positive(x: f64) -> bsm_core::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}
