//! Building blocks shared by the indicators.
//!
//! Rolling statistics follow the missing-value rule used across the workspace:
//! a trailing window produces a value only when every one of its members is a
//! value. Positions without one hold `NaN`.

use crate::num::TaFloat;
use crate::series::Series;

/// Compute a trailing simple moving average.
///
/// Position `i` holds the mean of `data[i + 1 - window..=i]` when that window
/// is complete and every member is finite, otherwise `NaN`. The first `window - 1`
/// positions are always `NaN`. A `window` of 0 yields an all-`NaN` series.
///
/// # Example
///
/// ```rust
/// use ti_core::utils::rolling_mean;
///
/// let data: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let result = rolling_mean(&data, 3);
/// assert!(result[0].is_nan());
/// assert!(result[1].is_nan());
/// assert_eq!(result[2], 2.0); // (1+2+3)/3
/// assert_eq!(result[3], 3.0); // (2+3+4)/3
/// assert_eq!(result[4], 4.0); // (3+4+5)/3
/// ```
#[must_use]
pub fn rolling_mean<T: TaFloat>(data: &[T], window: usize) -> Series<T> {
    if window == 0 {
        return Series::nan(data.len());
    }

    let divisor = <T as TaFloat>::from_usize(window);
    let mut result = Vec::with_capacity(data.len());
    let mut sum = T::ZERO;
    let mut missing = 0usize;

    for (i, &x) in data.iter().enumerate() {
        if x.is_valid() {
            sum = sum + x;
        } else {
            missing += 1;
        }

        if i >= window {
            let old = data[i - window];
            if !old.is_valid() {
                missing -= 1;
            } else {
                sum = sum - old;
            }
        }

        if i + 1 >= window && missing == 0 {
            result.push(sum / divisor);
        } else {
            result.push(T::NAN);
        }
    }

    Series::from_vec(result)
}

/// Compute an exponential moving average with `α = 2 / (window + 1)`.
///
/// The recursion is seeded with the first non-`NaN` input. A `NaN` input
/// emits `NaN` and leaves the recursion state unchanged, so the next value
/// continues from the last valid average.
///
/// # Example
///
/// ```rust
/// use ti_core::utils::ema;
///
/// let data: [f64; 3] = [1.0, 2.0, 4.0];
/// let result = ema(&data, 2);
/// assert_eq!(result[0], 1.0);
/// assert!((result[1] - 5.0 / 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn ema<T: TaFloat>(data: &[T], window: usize) -> Series<T> {
    let alpha = T::TWO / <T as TaFloat>::from_usize(window + 1);
    let one_minus_alpha = T::ONE - alpha;

    let mut state: Option<T> = None;
    data.iter()
        .map(|&x| {
            if x.is_nan() {
                return T::NAN;
            }
            let next = match state {
                None => x,
                Some(prev) => alpha * x + one_minus_alpha * prev,
            };
            state = Some(next);
            next
        })
        .collect()
}

/// Compute True Range from high, low and close columns.
///
/// `TR[0]` is `NaN` because there is no prior close. For `t ≥ 1`:
/// `max(H - L, |H - C[t-1]|, |L - C[t-1]|)`. A missing value among the three
/// inputs of a row yields `NaN` for that row.
///
/// The output covers the shortest of the three inputs.
#[must_use]
pub fn true_range<T: TaFloat>(high: &[T], low: &[T], close: &[T]) -> Series<T> {
    let len = high.len().min(low.len()).min(close.len());
    let mut result = Vec::with_capacity(len);
    if len == 0 {
        return Series::from_vec(result);
    }

    result.push(T::NAN);
    for i in 1..len {
        let prev_close = close[i - 1];
        let (h, l) = (high[i], low[i]);
        if h.is_nan() || l.is_nan() || prev_close.is_nan() {
            result.push(T::NAN);
            continue;
        }
        let hl = h - l;
        let hc = (h - prev_close).abs();
        let lc = (l - prev_close).abs();
        result.push(hl.max(hc).max(lc));
    }

    Series::from_vec(result)
}

/// Arithmetic mean, `NaN` for an empty slice.
#[must_use]
pub fn mean<T: TaFloat>(data: &[T]) -> T {
    if data.is_empty() {
        return T::NAN;
    }
    let sum = data.iter().fold(T::ZERO, |acc, &x| acc + x);
    sum / <T as TaFloat>::from_usize(data.len())
}

/// Unbiased sample variance around `center`, `NaN` for fewer than 2 values.
#[must_use]
pub fn sample_variance<T: TaFloat>(data: &[T], center: T) -> T {
    if data.len() < 2 {
        return T::NAN;
    }
    let sum_sq = data.iter().fold(T::ZERO, |acc, &x| {
        let d = x - center;
        acc + d * d
    });
    sum_sq / <T as TaFloat>::from_usize(data.len() - 1)
}
