//! Option variants and the validated option specification.

use bsm_core::errors::{Error, Result};
use bsm_core::{ensure, Rate, Real, Time, Volatility};
use std::fmt;
use std::str::FromStr;

/// The payoff variant of a European option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionVariant {
    /// Right to buy: `max(S − K, 0)`.
    Call,
    /// Right to sell: `max(K − S, 0)`.
    Put,
    /// Long call plus long put at the same strike: `|K − S|`.
    Straddle,
}

impl OptionVariant {
    /// Terminal payoff of this variant at underlying price `s` and strike
    /// `strike`.
    pub fn payoff(self, s: Real, strike: Real) -> Real {
        match self {
            OptionVariant::Call => (s - strike).max(0.0),
            OptionVariant::Put => (strike - s).max(0.0),
            OptionVariant::Straddle => (strike - s).abs(),
        }
    }
}

impl fmt::Display for OptionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionVariant::Call => write!(f, "Call"),
            OptionVariant::Put => write!(f, "Put"),
            OptionVariant::Straddle => write!(f, "Straddle"),
        }
    }
}

impl FromStr for OptionVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Call" | "call" => Ok(OptionVariant::Call),
            "Put" | "put" => Ok(OptionVariant::Put),
            "Straddle" | "straddle" => Ok(OptionVariant::Straddle),
            other => Err(Error::InvalidArgument(format!(
                "unknown option variant tag: {other:?}"
            ))),
        }
    }
}

/// A fully-specified European option together with its market inputs.
///
/// Construction validates the numeric ranges once; the pricing sessions can
/// then rely on strictly positive spot, strike, volatility, and residual
/// time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    /// Payoff variant.
    pub variant: OptionVariant,
    /// Underlying spot price.
    pub spot: Real,
    /// Strike price.
    pub strike: Real,
    /// Continuous dividend yield.
    pub dividend_yield: Rate,
    /// Continuously-compounded risk-free rate.
    pub risk_free_rate: Rate,
    /// Residual time to exercise, in years.
    pub residual_time: Time,
    /// Flat volatility.
    pub volatility: Volatility,
}

impl OptionSpec {
    /// Create a validated option specification.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        variant: OptionVariant,
        spot: Real,
        strike: Real,
        dividend_yield: Rate,
        risk_free_rate: Rate,
        residual_time: Time,
        volatility: Volatility,
    ) -> Result<Self> {
        ensure!(spot > 0.0, "spot must be positive, got {spot}");
        ensure!(strike > 0.0, "strike must be positive, got {strike}");
        ensure!(
            residual_time > 0.0,
            "residual time must be positive, got {residual_time}"
        );
        ensure!(
            volatility > 0.0,
            "volatility must be positive, got {volatility}"
        );
        Ok(Self {
            variant,
            spot,
            strike,
            dividend_yield,
            risk_free_rate,
            residual_time,
            volatility,
        })
    }

    /// Terminal payoff at underlying price `s`.
    pub fn payoff(&self, s: Real) -> Real {
        self.variant.payoff(s, self.strike)
    }
}
