//! `Date` — a calendar date.
//!
//! A thin wrapper over `chrono::NaiveDate` exposing just what the pricing
//! library needs: validated construction and day arithmetic.

use bsm_core::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A calendar date.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("no such date: {year}-{month:02}-{day:02}"))
            })
    }

    /// Number of calendar days from `self` to `other` (negative if `other`
    /// is earlier).
    pub fn days_until(&self, other: Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// The date `days` calendar days after this one.
    pub fn plus_days(&self, days: i64) -> Date {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month (1–12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The day of the month (1–31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Borrow the underlying `chrono` date.
    pub fn inner(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({})", self.0)
    }
}

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Self {
        Date(d)
    }
}
