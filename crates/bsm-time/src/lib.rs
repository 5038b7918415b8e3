//! # bsm-time
//!
//! The minimal calendar layer needed to map contract dates (reset, exercise)
//! to model time: a [`Date`] type backed by `chrono` and the
//! [`DayCounter`] conventions used by the stochastic processes.
//!
//! Holiday calendars, schedules, and business-day adjustments are out of
//! scope; pricing only needs year fractions between two dates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Calendar date type.
pub mod date;

/// Day-count conventions.
pub mod day_counter;

pub use date::Date;
pub use day_counter::{Actual360, Actual365Fixed, DayCounter};
