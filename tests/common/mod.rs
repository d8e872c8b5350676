//! Common test utilities for rust-ti.
//!
//! Float comparison that treats `NaN` as the no-value marker, plus
//! deterministic synthetic bar tables.

#![allow(dead_code)]

use ti_core::{DataFrame, Index, Series};

/// Compare one value, with `NaN` matching only `NaN`.
///
/// Values near zero are compared absolutely, others relatively.
pub fn assert_float_eq(actual: f64, expected: f64, epsilon: f64, context: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{context}: expected no value but got {actual}");
        return;
    }
    assert!(!actual.is_nan(), "{context}: got no value but expected {expected}");

    let diff = (actual - expected).abs();
    if expected.abs() < 1e-10 {
        assert!(diff < epsilon, "{context}: expected {expected} but got {actual} (diff: {diff})");
    } else {
        let rel = diff / expected.abs();
        assert!(
            rel < epsilon,
            "{context}: expected {expected} but got {actual} (rel diff: {rel:.2e})"
        );
    }
}

/// Compare two sequences element-wise.
pub fn assert_series_eq(actual: &[f64], expected: &[f64], epsilon: f64, name: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{name}: length mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        assert_float_eq(a, e, epsilon, &format!("{name}[{i}]"));
    }
}

/// Random walk close prices from a fixed seed.
pub fn generate_random_walk(start: f64, volatility: f64, len: usize, seed: u64) -> Vec<f64> {
    // LCG, mapped to [-1, 1]
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state as f64 / u64::MAX as f64) * 2.0 - 1.0
    };

    let mut prices = Vec::with_capacity(len);
    let mut last = start;
    for i in 0..len {
        if i > 0 {
            last = (last + next() * volatility).max(0.01);
        }
        prices.push(last);
    }
    prices
}

/// Bar table derived from close prices, with minute timestamps and the given
/// column labels in Open, High, Low, Close, Volume order.
pub fn ohlcv_table(close: &[f64], range_pct: f64, labels: [&str; 5]) -> DataFrame<f64> {
    let len = close.len();
    let mut open = Vec::with_capacity(len);
    let mut high = Vec::with_capacity(len);
    let mut low = Vec::with_capacity(len);
    let mut volume = Vec::with_capacity(len);

    for (i, &c) in close.iter().enumerate() {
        let range = c * range_pct;
        let o = if i == 0 { c } else { close[i - 1] };
        open.push(o);
        high.push(c.max(o) + range * 0.5);
        low.push(c.min(o) - range * 0.5);
        volume.push(1000.0 + i as f64 * 100.0);
    }

    let timestamps = (0..len as i64).map(|i| 1_700_000_000_000 + i * 60_000).collect();
    let mut df = DataFrame::with_index(Index::from_labels(timestamps));
    for (label, values) in labels.iter().zip([open, high, low, close.to_vec(), volume]) {
        df.add_column(*label, Series::from_vec(values))
            .expect("synthetic columns share one length");
    }
    df
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_float_eq_nan() {
        assert_float_eq(f64::NAN, f64::NAN, 1e-10, "nan");
    }

    #[test]
    #[should_panic]
    fn test_assert_float_eq_nan_vs_value() {
        assert_float_eq(1.0, f64::NAN, 1e-10, "nan");
    }

    #[test]
    fn test_random_walk_is_deterministic() {
        assert_eq!(
            generate_random_walk(100.0, 1.0, 50, 7),
            generate_random_walk(100.0, 1.0, 50, 7)
        );
    }
}
