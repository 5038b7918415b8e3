//! `DayCounter` trait and built-in day-count conventions.
//!
//! A day counter computes the **day count fraction** — the fraction of a year
//! between two dates — used when converting calendar dates to model time.

use crate::date::Date;
use bsm_core::{Real, Time};

/// A convention for counting the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/365 (Fixed)"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d1.days_until(d2)
    }

    /// Fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;
}

/// Actual/365 (Fixed) day counter.
///
/// `year_fraction = actual_days / 365`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360 day counter.
///
/// `year_fraction = actual_days / 360`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn actual_365_fixed() {
        let d1 = Date::from_ymd(2025, 1, 15).unwrap();
        let d2 = Date::from_ymd(2026, 1, 15).unwrap();
        let dc = Actual365Fixed;
        assert_eq!(dc.day_count(d1, d2), 365);
        assert_relative_eq!(dc.year_fraction(d1, d2), 1.0);
    }

    #[test]
    fn actual_360() {
        let d1 = Date::from_ymd(2025, 1, 15).unwrap();
        let d2 = Date::from_ymd(2025, 7, 14).unwrap(); // 180 days
        let dc = Actual360;
        assert_eq!(dc.day_count(d1, d2), 180);
        assert_relative_eq!(dc.year_fraction(d1, d2), 0.5);
    }
}
