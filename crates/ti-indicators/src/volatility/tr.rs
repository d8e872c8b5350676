//! True Range (TR) indicator.
//!
//! TR measures single-bar volatility, combining the bar's high-low spread with
//! any gap from the prior close.

use ti_core::{
    error::Result,
    num::TaFloat,
    ohlcv::{OhlcvView, Role},
    series::Series,
    traits::Indicator,
    utils,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub(crate) const HLC: &[Role] = &[Role::High, Role::Low, Role::Close];

/// Configuration for the TR indicator. True Range takes no parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrueRangeConfig;

/// True Range indicator.
///
/// # Formula
///
/// TR = max(High - Low, |High - Prev Close|, |Low - Prev Close|)
///
/// The first row has no previous close and is `NaN`.
#[derive(Debug, Clone)]
pub struct TrueRange<T: TaFloat> {
    config: TrueRangeConfig,
    _marker: core::marker::PhantomData<T>,
}

impl<T: TaFloat> TrueRange<T> {
    /// True Range of one bar given the previous close.
    #[must_use]
    pub fn bar(high: T, low: T, prev_close: T) -> T {
        let high_low = high - low;
        let high_pc = (high - prev_close).abs();
        let low_pc = (low - prev_close).abs();
        high_low.max(high_pc).max(low_pc)
    }

    /// Compute TR over raw high/low/close columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the columns differ in length.
    pub fn compute(high: &[T], low: &[T], close: &[T]) -> Result<Series<T>> {
        let view = OhlcvView::new()
            .with(Role::High, high)
            .with(Role::Low, low)
            .with(Role::Close, close);
        view.check_lengths()?;
        Ok(utils::true_range(high, low, close))
    }
}

impl<T: TaFloat> Indicator<T> for TrueRange<T> {
    type Output = Series<T>;
    type Config = TrueRangeConfig;

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
