//! Newey–West long-run variance with a Bartlett kernel.

use ti_core::num::TaFloat;

/// Bartlett kernel weight for lag `k` under truncation `lag`: `1 - k/(lag+1)`.
#[must_use]
pub fn bartlett_weight<T: TaFloat>(k: usize, lag: usize) -> T {
    if k > lag {
        return T::ZERO;
    }
    T::ONE - <T as TaFloat>::from_usize(k) / <T as TaFloat>::from_usize(lag + 1)
}

/// Sample autocovariance at lag `k` around `center`, divided by `m - 1`.
///
/// Sharing the `m - 1` divisor across lags keeps the lag-0 term equal to the
/// unbiased sample variance.
#[must_use]
pub fn autocovariance<T: TaFloat>(sample: &[T], center: T, k: usize) -> T {
    let m = sample.len();
    if m < 2 || k >= m {
        return T::NAN;
    }
    let sum = sample[k..]
        .iter()
        .zip(sample.iter())
        .fold(T::ZERO, |acc, (&later, &earlier)| {
            acc + (later - center) * (earlier - center)
        });
    sum / <T as TaFloat>::from_usize(m - 1)
}

/// Long-run (HAC) variance of `sample` around `center`.
///
/// `γ̂₀ + 2 Σ_{k=1..L'} (1 - k/(L'+1)) γ̂_k` with `L' = min(lag, m - 1)`.
/// The Bartlett estimate is non-negative; round-off below zero is clamped to
/// zero. Fewer than two observations give `NaN`.
#[must_use]
pub fn long_run_variance<T: TaFloat>(sample: &[T], center: T, lag: usize) -> T {
    let m = sample.len();
    if m < 2 {
        return T::NAN;
    }
    let lag = lag.min(m - 1);

    let mut variance = autocovariance(sample, center, 0);
    for k in 1..=lag {
        let weight: T = bartlett_weight(k, lag);
        variance = variance + T::TWO * weight * autocovariance(sample, center, k);
    }

    if variance < T::ZERO {
        T::ZERO
    } else {
        variance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ti_core::utils::{mean, sample_variance};

    #[test]
    fn test_bartlett_weights() {
        assert_relative_eq!(bartlett_weight::<f64>(0, 3), 1.0);
        assert_relative_eq!(bartlett_weight::<f64>(1, 3), 0.75);
        assert_relative_eq!(bartlett_weight::<f64>(3, 3), 0.25);
        assert_relative_eq!(bartlett_weight::<f64>(4, 3), 0.0);
    }

    #[test]
    fn test_lag_zero_matches_sample_variance() {
        let sample = [1.0, 4.0, 2.0, 8.0, 5.0];
        let mu = mean(&sample);
        assert_relative_eq!(
            long_run_variance(&sample, mu, 0),
            sample_variance(&sample, mu),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_hand_computed_lag_one() {
        // d = [-1, 0, 1]; γ0 = 2/2 = 1; γ1 = (0*-1 + 1*0)/2 = 0
        let sample = [1.0, 2.0, 3.0];
        assert_relative_eq!(long_run_variance(&sample, 2.0, 1), 1.0, epsilon = 1e-12);

        // d = [-1, -1, 1, 1]; γ0 = 4/3; γ1 = (1 - 1 + 1)/3 = 1/3; w1 = 1/2
        let sample = [0.0, 0.0, 2.0, 2.0];
        assert_relative_eq!(
            long_run_variance(&sample, 1.0, 1),
            4.0 / 3.0 + 1.0 / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_lag_capped_by_sample() {
        let sample = [0.0, 0.0, 2.0, 2.0];
        assert_relative_eq!(
            long_run_variance(&sample, 1.0, 100),
            long_run_variance(&sample, 1.0, 3),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_alternating_sample_is_clamped_non_negative() {
        let sample = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let v = long_run_variance(&sample, 0.0, 5);
        assert!(v >= 0.0);
    }

    #[test]
    fn test_short_sample() {
        assert!(long_run_variance::<f64>(&[1.0], 1.0, 3).is_nan());
        assert!(autocovariance::<f64>(&[1.0, 2.0], 1.5, 2).is_nan());
    }
}
