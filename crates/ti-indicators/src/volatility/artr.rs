//! Average Relative True Range (ARTR) indicator.

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

use super::rtr::Rtr;
use super::tr::HLC;

/// Configuration for the ARTR indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArtrConfig {
    /// The lookback period (default: 14).
    pub window: usize,
}

impl Default for ArtrConfig {
    fn default() -> Self {
        Self { window: 14 }
    }
}

impl ArtrConfig {
    /// Create a new ARTR configuration with the given window.
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

/// Average Relative True Range indicator.
///
/// Simple moving average of [`Rtr`] over `window` rows, with the same window
/// rule as [`Atr`](super::Atr): first value at row `window`.
#[derive(Debug, Clone)]
pub struct Artr<T: TaFloat> {
    config: ArtrConfig,
    _marker: core::marker::PhantomData<T>,
}

impl<T: TaFloat> Artr<T> {
    /// Smooth an already computed RTR series.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InvalidWindow`] for a zero window.
    pub fn from_rtr(rtr: &[T], window: usize) -> Result<Series<T>> {
        if window == 0 {
            return Err(IndicatorError::InvalidWindow(0));
        }
        Ok(utils::rolling_mean(rtr, window))
    }
}

impl<T: TaFloat> Indicator<T> for Artr<T> {
    type Output = Series<T>;
    type Config = ArtrConfig;

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
        if self.config.window == 0 {
            return Err(IndicatorError::InvalidWindow(0));
        }
        let rtr = Rtr::compute(
            data.require(Role::High)?,
            data.require(Role::Low)?,
            data.require(Role::Close)?,
        )?;
        Self::from_rtr(rtr.as_slice(), self.config.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_artr_calculate() {
        // TR = [NaN, 2, 4, 2]; prior close = [10, 10, 20] => RTR = [NaN, 0.2, 0.4, 0.1]
        let high = [10.0, 11.0, 14.0, 21.0];
        let low = [9.0, 9.0, 10.0, 19.0];
        let close = [10.0, 10.0, 20.0, 20.0];
        let view = OhlcvView::new()
            .with(Role::High, &high)
            .with(Role::Low, &low)
            .with(Role::Close, &close);

        let result = Artr::<f64>::new(ArtrConfig::new(2)).calculate(&view).unwrap();

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_relative_eq!(result[2], 0.3, epsilon = 1e-12);
        assert_relative_eq!(result[3], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_artr_zero_window() {
        assert!(Artr::<f64>::from_rtr(&[0.1, 0.2], 0).is_err());
    }
}
