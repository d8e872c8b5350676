//! Exponential Moving Average (EMA) indicator.
//!
//! The EMA gives more weight to recent values using an exponential
//! smoothing factor derived from the span.

use ti_core::{
    error::{IndicatorError, Result},
    num::TaFloat,
    series::Series,
    traits::SeriesIndicator,
    utils,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the EMA indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmaConfig {
    /// The span of the EMA.
    pub window: usize,
}

impl Default for EmaConfig {
    fn default() -> Self {
        Self { window: 14 }
    }
}

impl EmaConfig {
    /// Create a new EMA configuration with the given span.
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Smoothing factor `α = 2 / (window + 1)`.
    #[must_use]
    pub fn alpha<T: TaFloat>(&self) -> T {
        T::TWO / <T as TaFloat>::from_usize(self.window + 1)
    }
}

/// Exponential Moving Average indicator.
///
/// # Formula
///
/// EMA_t = α * x_t + (1 - α) * EMA_{t-1}
///
/// Seeded with the first non-`NaN` value. Missing inputs emit `NaN` and do not
/// advance the recursion.
#[derive(Debug, Clone)]
pub struct Ema<T: TaFloat> {
    config: EmaConfig,
    _marker: core::marker::PhantomData<T>,
}

impl<T: TaFloat> SeriesIndicator<T> for Ema<T> {
    type Config = EmaConfig;

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
        1
    }

    fn calculate(&self, data: &[T]) -> Result<Series<T>> {
        if self.config.window == 0 {
            return Err(IndicatorError::InvalidWindow(0));
        }
        Ok(utils::ema(data, self.config.window))
    }
}
