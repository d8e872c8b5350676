//! Core trait definitions for indicators.
//!
//! Table-scoped indicators read price roles through an [`OhlcvView`];
//! sequence-scoped indicators read one positional series. Both compute in batch
//! over the whole input and return outputs of the same length.

use crate::error::Result;
use crate::num::TaFloat;
use crate::ohlcv::{OhlcvView, Role};
use crate::series::Series;

/// Configuration trait bounds for indicator configurations.
pub trait IndicatorConfig: Clone + Default + Send + Sync {}

impl<T> IndicatorConfig for T where T: Clone + Default + Send + Sync {}

/// Core trait for table-scoped indicators.
///
/// Construction never fails; configuration is validated when
/// [`calculate`](Indicator::calculate) runs so that a bad value surfaces as an
/// error on the call that uses it.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use ti_core::{Indicator, OhlcvView, Result, Role, Series, TaFloat};
///
/// impl<T: TaFloat> Indicator<T> for Range<T> {
///     type Output = Series<T>;
///     type Config = RangeConfig;
///
///     fn new(config: Self::Config) -> Self { /* ... */ }
///     fn min_periods(&self) -> usize { 1 }
///     fn required_roles(&self) -> &'static [Role] { &[Role::High, Role::Low] }
///     fn calculate(&self, data: &OhlcvView<'_, T>) -> Result<Self::Output> { /* ... */ }
///     fn config(&self) -> &Self::Config { &self.config }
/// }
/// ```
pub trait Indicator<T: TaFloat>: Send + Sync {
    /// The output type of calculations.
    type Output;

    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Create a new indicator with the given configuration.
    fn new(config: Self::Config) -> Self
    where
        Self: Sized;

    /// Rows consumed before the first value can appear.
    fn min_periods(&self) -> usize;

    /// Price roles read by [`calculate`](Indicator::calculate).
    fn required_roles(&self) -> &'static [Role];

    /// Perform batch calculation over the given price columns.
    ///
    /// # Errors
    ///
    /// Returns an error if a required role is missing, column lengths differ,
    /// or the configuration is invalid.
    fn calculate(&self, data: &OhlcvView<'_, T>) -> Result<Self::Output>;

    /// Get a reference to the current configuration.
    fn config(&self) -> &Self::Config;
}

/// Core trait for indicators over a single positional sequence.
pub trait SeriesIndicator<T: TaFloat>: Send + Sync {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Create a new indicator with the given configuration.
    fn new(config: Self::Config) -> Self
    where
        Self: Sized;

    /// Positions consumed before the first value can appear.
    fn min_periods(&self) -> usize;

    /// Perform batch calculation over `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn calculate(&self, data: &[T]) -> Result<Series<T>>;

    /// Get a reference to the current configuration.
    fn config(&self) -> &Self::Config;
}
