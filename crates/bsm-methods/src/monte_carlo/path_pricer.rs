//! Path pricers: map realized paths to discounted payoffs.

use bsm_core::{ensure, Real, Result, Size};
use bsm_instruments::OptionVariant;

use super::path_generator::Path;

/// Maps one realized path to one discounted payoff sample.
pub trait PathPricer: std::fmt::Debug {
    /// The discounted payoff realized along `path`.
    fn value(&self, path: &Path) -> Real;
}

/// Prices a plain European option off the terminal path value.
#[derive(Debug, Clone, Copy)]
pub struct EuropeanPathPricer {
    variant: OptionVariant,
    strike: Real,
    discount: Real,
}

impl EuropeanPathPricer {
    /// A pricer for `variant` struck at `strike`, discounting payoffs by
    /// the factor `discount`.
    pub fn new(variant: OptionVariant, strike: Real, discount: Real) -> Result<Self> {
        ensure!(strike > 0.0, "strike must be positive, got {strike}");
        ensure!(
            discount > 0.0 && discount <= 1.0,
            "discount factor must lie in (0, 1], got {discount}"
        );
        Ok(Self {
            variant,
            strike,
            discount,
        })
    }
}

impl PathPricer for EuropeanPathPricer {
    fn value(&self, path: &Path) -> Real {
        self.discount * self.variant.payoff(path.back(), self.strike)
    }
}

/// Prices a forward-starting European option.
///
/// The strike is fixed on the path itself, at the reset point, as
/// `moneyness` times the underlying value observed there; the payoff is
/// then read off the terminal value as usual.
#[derive(Debug, Clone, Copy)]
pub struct ForwardVanillaPathPricer {
    variant: OptionVariant,
    moneyness: Real,
    reset_index: Size,
    discount: Real,
}

impl ForwardVanillaPathPricer {
    /// A pricer fixing the strike at path point `reset_index`.
    pub fn new(
        variant: OptionVariant,
        moneyness: Real,
        reset_index: Size,
        discount: Real,
    ) -> Result<Self> {
        ensure!(moneyness > 0.0, "moneyness must be positive, got {moneyness}");
        ensure!(
            discount > 0.0 && discount <= 1.0,
            "discount factor must lie in (0, 1], got {discount}"
        );
        Ok(Self {
            variant,
            moneyness,
            reset_index,
            discount,
        })
    }
}

impl PathPricer for ForwardVanillaPathPricer {
    fn value(&self, path: &Path) -> Real {
        let strike = self.moneyness * path.value(self.reset_index);
        self.discount * self.variant.payoff(path.back(), strike)
    }
}
