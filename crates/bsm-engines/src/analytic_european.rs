//! Closed-form Black-Scholes-Merton values and Greeks.
//!
//! The numerical engines are validated against these formulas; they are
//! also useful on their own whenever the instrument is plain enough to
//! price in closed form.

use bsm_core::{ensure, Rate, Real, Result, Time, Volatility};
use bsm_instruments::OptionVariant;
use bsm_math::distributions::{normal_cdf, normal_pdf};

/// Value and Greeks of a European option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanResults {
    /// Present value.
    pub value: Real,
    /// Sensitivity to the spot price.
    pub delta: Real,
    /// Second-order sensitivity to the spot price.
    pub gamma: Real,
    /// Sensitivity to the passage of time, per year.
    pub theta: Real,
}

impl std::ops::Add for EuropeanResults {
    type Output = EuropeanResults;

    fn add(self, other: EuropeanResults) -> EuropeanResults {
        EuropeanResults {
            value: self.value + other.value,
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
        }
    }
}

/// Price a European option in closed form.
///
/// A straddle is priced as a call plus a put at the same strike.
#[allow(clippy::too_many_arguments)]
pub fn black_scholes_merton(
    variant: OptionVariant,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    residual_time: Time,
) -> Result<EuropeanResults> {
    ensure!(spot > 0.0, "spot must be positive, got {spot}");
    ensure!(strike > 0.0, "strike must be positive, got {strike}");
    ensure!(
        volatility > 0.0,
        "volatility must be positive, got {volatility}"
    );
    ensure!(
        residual_time > 0.0,
        "residual time must be positive, got {residual_time}"
    );

    if let OptionVariant::Straddle = variant {
        let call = black_scholes_merton(
            OptionVariant::Call,
            spot,
            strike,
            risk_free_rate,
            dividend_yield,
            volatility,
            residual_time,
        )?;
        let put = black_scholes_merton(
            OptionVariant::Put,
            spot,
            strike,
            risk_free_rate,
            dividend_yield,
            volatility,
            residual_time,
        )?;
        return Ok(call + put);
    }

    let (r, q, sigma, t) = (risk_free_rate, dividend_yield, volatility, residual_time);
    let sqrt_t = t.sqrt();
    let vol_sqrt_t = sigma * sqrt_t;
    let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    let df_q = (-q * t).exp();
    let df_r = (-r * t).exp();

    let gamma = df_q * normal_pdf(d1) / (spot * vol_sqrt_t);
    let theta_common = -spot * df_q * normal_pdf(d1) * sigma / (2.0 * sqrt_t);

    let results = match variant {
        OptionVariant::Call => {
            let value = spot * df_q * normal_cdf(d1) - strike * df_r * normal_cdf(d2);
            let delta = df_q * normal_cdf(d1);
            let theta = theta_common + q * spot * df_q * normal_cdf(d1)
                - r * strike * df_r * normal_cdf(d2);
            EuropeanResults {
                value,
                delta,
                gamma,
                theta,
            }
        }
        OptionVariant::Put => {
            let value = strike * df_r * normal_cdf(-d2) - spot * df_q * normal_cdf(-d1);
            let delta = -df_q * normal_cdf(-d1);
            let theta = theta_common - q * spot * df_q * normal_cdf(-d1)
                + r * strike * df_r * normal_cdf(-d2);
            EuropeanResults {
                value,
                delta,
                gamma,
                theta,
            }
        }
        OptionVariant::Straddle => unreachable!("handled above"),
    };
    Ok(results)
}
