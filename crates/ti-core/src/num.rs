//! Numeric type abstractions for indicator computations.
//!
//! This module defines the [`TaFloat`] trait which abstracts over `f32` and `f64`
//! for generic numeric operations.

use num_traits::{Float, FromPrimitive, ToPrimitive};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Serialize};

/// Serialization bound that only applies with the `serde` feature.
#[cfg(feature = "serde")]
pub trait MaybeSerde: Serialize + DeserializeOwned {}

#[cfg(feature = "serde")]
impl<T: Serialize + DeserializeOwned> MaybeSerde for T {}

/// Serialization bound that only applies with the `serde` feature.
#[cfg(not(feature = "serde"))]
pub trait MaybeSerde {}

#[cfg(not(feature = "serde"))]
impl<T> MaybeSerde for T {}

/// Trait for floating-point types used in indicator calculations.
///
/// This trait provides a common interface for `f32` and `f64`, enabling generic
/// implementations of the volatility primitives and the standardization engine.
/// `NaN` is the no-value marker throughout the workspace.
///
/// # Example
///
/// ```rust
/// use ti_core::TaFloat;
///
/// fn relative<T: TaFloat>(range: T, prev_close: T) -> T {
///     range.safe_div(prev_close)
/// }
///
/// assert_eq!(relative(2.0_f64, 100.0), 0.02);
/// assert!(relative(2.0_f64, 0.0).is_nan());
/// ```
pub trait TaFloat:
    Float + FromPrimitive + ToPrimitive + Copy + Send + Sync + Default + MaybeSerde + 'static
{
    /// Not-a-number value.
    const NAN: Self;
    /// Positive infinity.
    const INFINITY: Self;
    /// Negative infinity.
    const NEG_INFINITY: Self;
    /// Zero value.
    const ZERO: Self;
    /// One value.
    const ONE: Self;
    /// Two value.
    const TWO: Self;

    /// Convert from `f64`.
    #[must_use]
    fn from_f64_lossy(value: f64) -> Self;

    /// Convert to `f64`.
    #[must_use]
    fn to_f64_lossy(self) -> f64;

    /// Convert from `usize`.
    #[must_use]
    fn from_usize(value: usize) -> Self;

    /// Check if the value is valid (not NaN and not infinite).
    #[must_use]
    fn is_valid(self) -> bool {
        !self.is_nan() && !self.is_infinite()
    }

    /// Division that yields `NaN` instead of infinity for a zero or missing
    /// denominator.
    #[must_use]
    fn safe_div(self, denominator: Self) -> Self {
        if denominator == Self::ZERO || denominator.is_nan() {
            Self::NAN
        } else {
            self / denominator
        }
    }
}

impl TaFloat for f32 {
    const NAN: Self = f32::NAN;
    const INFINITY: Self = f32::INFINITY;
    const NEG_INFINITY: Self = f32::NEG_INFINITY;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f32
    }
}

impl TaFloat for f64 {
    const NAN: Self = f64::NAN;
    const INFINITY: Self = f64::INFINITY;
    const NEG_INFINITY: Self = f64::NEG_INFINITY;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;

    #[inline]
    fn from_f64_lossy(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }

    #[inline]
    fn from_usize(value: usize) -> Self {
        value as f64
    }
}
