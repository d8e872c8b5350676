//! Relative True Range (RTR) indicator.
//!
//! RTR is True Range expressed as a fraction of the prior close, which makes it
//! comparable across instruments and price levels.

use ti_core::{
    error::Result,
    num::TaFloat,
    ohlcv::{OhlcvView, Role},
    series::Series,
    traits::Indicator,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::tr::{TrueRange, HLC};

/// Configuration for the RTR indicator. RTR takes no parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RtrConfig;

/// Relative True Range indicator.
///
/// # Formula
///
/// RTR_t = TR_t / Close_{t-1}
///
/// `NaN` at row 0 and wherever the prior close is zero or missing.
#[derive(Debug, Clone)]
pub struct Rtr<T: TaFloat> {
    config: RtrConfig,
    _marker: core::marker::PhantomData<T>,
}

impl<T: TaFloat> Rtr<T> {
    /// Compute RTR over raw high/low/close columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the columns differ in length.
    pub fn compute(high: &[T], low: &[T], close: &[T]) -> Result<Series<T>> {
        let tr = TrueRange::compute(high, low, close)?;
        let rtr = tr
            .iter()
            .enumerate()
            .map(|(i, &range)| match i {
                0 => T::NAN,
                _ => range.safe_div(close[i - 1]),
            })
            .collect();
        Ok(rtr)
    }
}

impl<T: TaFloat> Indicator<T> for Rtr<T> {
    type Output = Series<T>;
    type Config = RtrConfig;

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
        2
    }

    fn required_roles(&self) -> &'static [Role] {
        HLC
    }

    fn calculate(&self, data: &OhlcvView<'_, T>) -> Result<Self::Output> {
        Self::compute(
            data.require(Role::High)?,
            data.require(Role::Low)?,
            data.require(Role::Close)?,
        )
    }
}
