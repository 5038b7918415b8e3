//! Step-condition capability.
//!
//! Instruments that constrain the solution during the backward rollback
//! (early exercise, shout resets) implement this trait; the
//! finite-difference stepper applies it after every time step.  European
//! instruments simply supply none.

use bsm_core::{Real, Time};

/// A constraint applied to the value vector at each rollback step.
pub trait StepCondition: std::fmt::Debug {
    /// Adjust `values` in place at model time `t`.
    ///
    /// `prices` holds the underlying price at each grid point, aligned with
    /// `values`.
    fn apply(&self, t: Time, values: &mut [Real], prices: &[Real]);
}
