//! # bsm-instruments
//!
//! The option descriptors the numerical engines price: the
//! [`OptionVariant`] tag, the validated [`OptionSpec`] value type, and the
//! [`StepCondition`] capability seam for instruments that constrain the
//! rollback at each time step.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Option variants and the validated option specification.
pub mod option;

/// Step-condition capability for the finite-difference rollback.
pub mod step_condition;

pub use option::{OptionSpec, OptionVariant};
pub use step_condition::StepCondition;
