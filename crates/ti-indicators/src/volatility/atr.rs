//! Average True Range (ATR) indicator.
//!
//! ATR measures market volatility as a simple moving average of True Range.

use ti_core::{
    error::{IndicatorError, Result},
    num::TaFloat,
    ohlcv::{OhlcvView, Role},
    series::Series,
    traits::Indicator,
    utils,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::tr::{TrueRange, HLC};

/// Configuration for the ATR indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AtrConfig {
    /// The lookback period (default: 14).
    pub window: usize,
}

impl Default for AtrConfig {
    fn default() -> Self {
        Self { window: 14 }
    }
}

impl AtrConfig {
    /// Create a new ATR configuration with the given window.
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

/// Average True Range indicator.
///
/// # Formula
///
/// ATR(n)_t = mean(TR_{t-n+1}, ..., TR_t)
///
/// A window holding any `NaN` True Range yields `NaN`. Because `TR[0]` is
/// always `NaN`, the first value appears at row `n`.
#[derive(Debug, Clone)]
pub struct Atr<T: TaFloat> {
    config: AtrConfig,
    _marker: core::marker::PhantomData<T>,
}

impl<T: TaFloat> Indicator<T> for Atr<T> {
    type Output = Series<T>;
    type Config = AtrConfig;

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            _marker: core::marker::PhantomData,
        }
    }

    fn min_periods(&self) -> usize {
        self.config.window + 1
    }

    fn required_roles(&self) -> &'static [Role] {
        HLC
    }

    fn calculate(&self, data: &OhlcvView<'_, T>) -> Result<Self::Output> {
        let window = self.config.window;
        if window == 0 {
            return Err(IndicatorError::InvalidWindow(0));
        }

        let tr = TrueRange::compute(
            data.require(Role::High)?,
            data.require(Role::Low)?,
            data.require(Role::Close)?,
        )?;
        Ok(utils::rolling_mean(tr.as_slice(), window))
    }
}
