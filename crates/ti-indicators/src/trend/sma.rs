//! Simple Moving Average (SMA) indicator.
//!
//! The SMA is the unweighted mean of the previous n data points.

use ti_core::{
    error::{IndicatorError, Result},
    num::TaFloat,
    series::Series,
    traits::SeriesIndicator,
    utils,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the SMA indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SmaConfig {
    /// The window size for the moving average.
    pub window: usize,
}

impl Default for SmaConfig {
    fn default() -> Self {
        Self { window: 14 }
    }
}

impl SmaConfig {
    /// Create a new SMA configuration with the given window.
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

/// Simple Moving Average indicator.
///
/// # Formula
///
/// SMA = (P1 + P2 + ... + Pn) / n
///
/// The first `n - 1` positions, and any window holding a non-finite value, are `NaN`.
#[derive(Debug, Clone)]
pub struct Sma<T: TaFloat> {
    config: SmaConfig,
    _marker: core::marker::PhantomData<T>,
}

impl<T: TaFloat> SeriesIndicator<T> for Sma<T> {
    type Config = SmaConfig;

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
        self.config.window
    }

    fn calculate(&self, data: &[T]) -> Result<Series<T>> {
        if self.config.window == 0 {
            return Err(IndicatorError::InvalidWindow(0));
        }
        Ok(utils::rolling_mean(data, self.config.window))
    }
}
