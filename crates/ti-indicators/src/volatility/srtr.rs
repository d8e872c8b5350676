//! Standardized Relative True Range (SRTR).
//!
//! SRTR expresses the current relative true range as a number of standard
//! errors away from its recent mean. The mean and variance are estimated on a
//! trailing calibration window of RTR observations, either under an i.i.d.
//! assumption or with a Newey–West (Bartlett kernel) long-run variance that
//! accounts for volatility clustering.

use core::fmt;
use core::str::FromStr;

use ti_core::{
    error::{IndicatorError, Result},
    num::TaFloat,
    ohlcv::{OhlcvView, Role},
    series::Series,
    traits::Indicator,
    utils,
    window::RingBuffer,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::artr::Artr;
use super::hac::long_run_variance;
use super::rtr::Rtr;
use super::tr::HLC;

/// Variance estimator used on the calibration window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SrtrMethod {
    /// Unbiased sample variance.
    Iid,
    /// Bartlett-kernel Newey–West long-run variance.
    #[default]
    Cluster,
}

impl SrtrMethod {
    /// Accepted spellings, in the order they are documented.
    pub const CHOICES: &'static [&'static str] = &["iid", "cluster"];

    /// Keyword spelling of the method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SrtrMethod::Iid => "iid",
            SrtrMethod::Cluster => "cluster",
        }
    }
}

impl fmt::Display for SrtrMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SrtrMethod {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "iid" => Ok(SrtrMethod::Iid),
            "cluster" => Ok(SrtrMethod::Cluster),
            other => Err(IndicatorError::invalid_parameter(
                "method",
                other,
                "'iid' or 'cluster'",
            )),
        }
    }
}

/// Configuration for the SRTR indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SrtrConfig {
    /// Short window `n` of the ARTR reference and default HAC lag (default: 14).
    pub window: usize,
    /// Calibration window cap `N` (default: 1000).
    pub calibration: usize,
    /// Grow the calibration window from the start of history up to `N`
    /// instead of waiting for `N` observations (default: false).
    pub expand: bool,
    /// Variance estimator (default: cluster).
    pub method: SrtrMethod,
    /// HAC truncation lag `L`; `None` means `window - 1`.
    pub lag: Option<usize>,
    /// Variance at or below this is treated as degenerate (default: 1e-18).
    pub variance_floor: f64,
}

impl Default for SrtrConfig {
    fn default() -> Self {
        Self {
            window: 14,
            calibration: 1000,
            expand: false,
            method: SrtrMethod::Cluster,
            lag: None,
            variance_floor: 1e-18,
        }
    }
}

impl SrtrConfig {
    /// Create a configuration with the given short and calibration windows.
    pub fn new(window: usize, calibration: usize) -> Self {
        Self {
            window,
            calibration,
            ..Self::default()
        }
    }

    /// Set the expanding-window option.
    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Set the variance estimator.
    pub fn with_method(mut self, method: SrtrMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the HAC truncation lag.
    pub fn with_lag(mut self, lag: usize) -> Self {
        self.lag = Some(lag);
        self
    }

    /// Set the variance floor.
    pub fn with_variance_floor(mut self, floor: f64) -> Self {
        self.variance_floor = floor;
        self
    }

    /// HAC truncation lag in effect.
    #[must_use]
    pub fn effective_lag(&self) -> usize {
        self.lag.unwrap_or(self.window.saturating_sub(1))
    }

    /// Observations needed before the first value.
    #[must_use]
    pub fn min_observations(&self) -> usize {
        if self.expand {
            self.window.max(2)
        } else {
            self.calibration
        }
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns an error for `n = 0`, `N < 2`, `N ≤ n` or a negative or
    /// non-finite variance floor.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(IndicatorError::InvalidWindow(0));
        }
        if self.calibration < 2 {
            return Err(IndicatorError::invalid_parameter(
                "N",
                self.calibration,
                "at least 2",
            ));
        }
        if self.calibration <= self.window {
            return Err(IndicatorError::invalid_parameter(
                "N",
                self.calibration,
                "greater than n",
            ));
        }
        if !self.variance_floor.is_finite() || self.variance_floor < 0.0 {
            return Err(IndicatorError::invalid_parameter(
                "variance_floor",
                self.variance_floor,
                "finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Full SRTR output: the standardized series plus its diagnostics.
///
/// All series share the input's length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: TaFloat"))]
pub struct SrtrOutput<T: TaFloat> {
    /// Relative true range.
    pub rtr: Series<T>,
    /// ARTR(n) reference.
    pub artr: Series<T>,
    /// Calibration mean μ_t.
    pub mean: Series<T>,
    /// Variance estimate σ²_t.
    pub variance: Series<T>,
    /// Numerator `RTR_t - μ_t`.
    pub numerator: Series<T>,
    /// Standardized statistic.
    pub srtr: Series<T>,
}

impl<T: TaFloat> SrtrOutput<T> {
    /// Column labels of [`into_columns`](Self::into_columns), in order.
    pub const COLUMNS: [&'static str; 6] = ["RTR", "ARTR", "mean", "variance", "numerator", "SRTR"];

    /// Labeled columns in the order of [`COLUMNS`](Self::COLUMNS).
    #[must_use]
    pub fn into_columns(self) -> Vec<(&'static str, Series<T>)> {
        let [rtr, artr, mean, variance, numerator, srtr] = Self::COLUMNS;
        vec![
            (rtr, self.rtr),
            (artr, self.artr),
            (mean, self.mean),
            (variance, self.variance),
            (numerator, self.numerator),
            (srtr, self.srtr),
        ]
    }
}

/// Standardized Relative True Range indicator.
///
/// For every row `t` with a valid `RTR_t`:
///
/// 1. `RTR_t` joins the calibration window (at most `N` most recent valid
///    values, the current one included).
/// 2. Once the window holds enough observations (`N`, or `max(n, 2)` when
///    expanding), `μ_t` and `σ²_t` are estimated on it.
/// 3. `SRTR_t = (RTR_t - μ_t) / √σ²_t`, or `NaN` when `σ²_t` is at or below
///    the variance floor.
///
/// Rows with a missing RTR produce `NaN` and are not added to the window.
#[derive(Debug, Clone)]
pub struct Srtr<T: TaFloat> {
    config: SrtrConfig,
    _marker: core::marker::PhantomData<T>,
}

impl<T: TaFloat> Srtr<T> {
    /// Standardize an already computed RTR series.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_rtr(&self, rtr: Series<T>) -> Result<SrtrOutput<T>> {
        let config = &self.config;
        config.validate()?;

        let len = rtr.len();
        let lag = config.effective_lag();
        let min_obs = config.min_observations();
        let floor = T::from_f64_lossy(config.variance_floor);

        tracing::debug!(
            rows = len,
            n = config.window,
            calibration = config.calibration,
            expand = config.expand,
            method = %config.method,
            lag,
            "computing SRTR"
        );

        let artr = Artr::from_rtr(rtr.as_slice(), config.window)?;
        // the window never holds more than `len` values
        let capacity = config.calibration.min(len).max(1);
        let mut window = RingBuffer::new(capacity)?;
        let mut sample = Vec::with_capacity(capacity);

        let mut mean = vec![T::NAN; len];
        let mut variance = vec![T::NAN; len];
        let mut numerator = vec![T::NAN; len];
        let mut srtr = vec![T::NAN; len];
        let mut degenerate = 0usize;

        for (t, &r) in rtr.iter().enumerate() {
            if r.is_nan() {
                continue;
            }
            window.push(r);
            if window.len() < min_obs {
                continue;
            }

            window.copy_into(&mut sample);
            let mu = utils::mean(&sample);
            let sigma2 = match config.method {
                SrtrMethod::Iid => utils::sample_variance(&sample, mu),
                SrtrMethod::Cluster => long_run_variance(&sample, mu, lag),
            };

            mean[t] = mu;
            variance[t] = sigma2;
            numerator[t] = r - mu;
            if sigma2 > floor {
                srtr[t] = numerator[t] / sigma2.sqrt();
            } else {
                degenerate += 1;
            }
        }

        if degenerate > 0 {
            tracing::trace!(degenerate, "SRTR rows with variance at or below floor");
        }

        Ok(SrtrOutput {
            rtr,
            artr,
            mean: Series::from_vec(mean),
            variance: Series::from_vec(variance),
            numerator: Series::from_vec(numerator),
            srtr: Series::from_vec(srtr),
        })
    }
}

impl<T: TaFloat> Indicator<T> for Srtr<T> {
    type Output = SrtrOutput<T>;
    type Config = SrtrConfig;

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
        self.config.min_observations() + 1
    }

    fn required_roles(&self) -> &'static [Role] {
        HLC
    }

    fn calculate(&self, data: &OhlcvView<'_, T>) -> Result<Self::Output> {
        self.config.validate()?;
        let rtr = Rtr::compute(
            data.require(Role::High)?,
            data.require(Role::Low)?,
            data.require(Role::Close)?,
        )?;
        self.from_rtr(rtr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn srtr(config: SrtrConfig, rtr: Vec<f64>) -> SrtrOutput<f64> {
        Srtr::<f64>::new(config)
            .from_rtr(Series::from_vec(rtr))
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = SrtrConfig::default();
        assert_eq!(config.window, 14);
        assert_eq!(config.calibration, 1000);
        assert!(!config.expand);
        assert_eq!(config.method, SrtrMethod::Cluster);
        assert_eq!(config.effective_lag(), 13);
    }

    #[test]
    fn test_validation() {
        assert!(SrtrConfig::new(0, 10).validate().is_err());
        assert!(SrtrConfig::new(1, 1).validate().is_err());
        assert!(SrtrConfig::new(5, 5).validate().is_err());
        assert!(SrtrConfig::new(5, 6).validate().is_ok());
        assert!(SrtrConfig::new(2, 6)
            .with_variance_floor(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("iid".parse::<SrtrMethod>().unwrap(), SrtrMethod::Iid);
        assert_eq!("cluster".parse::<SrtrMethod>().unwrap(), SrtrMethod::Cluster);
        assert!("hac".parse::<SrtrMethod>().is_err());
    }

    #[test]
    fn test_rolling_iid_hand_computed() {
        // N = 3, rolling: first value once three valid RTR exist.
        let rtr = vec![f64::NAN, 1.0, 2.0, 3.0, 5.0];
        let out = srtr(
            SrtrConfig::new(1, 3).with_method(SrtrMethod::Iid),
            rtr,
        );

        for t in 0..3 {
            assert!(out.srtr[t].is_nan(), "row {t} should be warm-up");
        }
        // window [1, 2, 3]: mean 2, var 1
        assert_relative_eq!(out.mean[3], 2.0);
        assert_relative_eq!(out.variance[3], 1.0);
        assert_relative_eq!(out.srtr[3], 1.0);
        // window [2, 3, 5]: mean 10/3, var ((4/3)^2 + (1/3)^2 + (5/3)^2)/2 = 7/3
        assert_relative_eq!(out.mean[4], 10.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(out.variance[4], 7.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(out.numerator[4], 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(
            out.srtr[4],
            (5.0 / 3.0) / (7.0_f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_expanding_warm_up() {
        // expand: usable once max(n, 2) = 2 observations exist, capped at N = 3
        let rtr = vec![f64::NAN, 1.0, 3.0, 5.0, 7.0];
        let out = srtr(
            SrtrConfig::new(2, 3)
                .with_expand(true)
                .with_method(SrtrMethod::Iid),
            rtr,
        );

        assert!(out.srtr[1].is_nan());
        // [1, 3]: mean 2, var 2
        assert_relative_eq!(out.mean[2], 2.0);
        assert_relative_eq!(out.variance[2], 2.0);
        // [1, 3, 5]: mean 3, var 4
        assert_relative_eq!(out.mean[3], 3.0);
        assert_relative_eq!(out.variance[3], 4.0);
        // capped: [3, 5, 7]
        assert_relative_eq!(out.mean[4], 5.0);
        assert_relative_eq!(out.srtr[4], 1.0);
    }

    #[test]
    fn test_calibration_longer_than_input() {
        let rtr = vec![f64::NAN, 1.0, 3.0, 5.0, 7.0];
        let huge = 1usize << 61;

        let rolling = srtr(SrtrConfig::new(2, huge), rtr.clone());
        assert_eq!(rolling.srtr.len(), 5);
        assert_eq!(rolling.srtr.nan_count(), 5);

        // expanding never reaches the cap, so it matches a cap of the row count
        let expanding = srtr(
            SrtrConfig::new(2, huge)
                .with_expand(true)
                .with_method(SrtrMethod::Iid),
            rtr.clone(),
        );
        let capped = srtr(
            SrtrConfig::new(2, 5)
                .with_expand(true)
                .with_method(SrtrMethod::Iid),
            rtr,
        );
        assert_relative_eq!(expanding.mean[4], 4.0);
        for t in 2..5 {
            assert_relative_eq!(expanding.srtr[t], capped.srtr[t], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_missing_rtr_is_skipped() {
        let rtr = vec![1.0, 2.0, f64::NAN, 3.0];
        let out = srtr(SrtrConfig::new(1, 3).with_method(SrtrMethod::Iid), rtr);

        assert!(out.srtr[2].is_nan());
        assert!(out.mean[2].is_nan());
        // window holds [1, 2, 3] at row 3
        assert_relative_eq!(out.mean[3], 2.0);
        assert_relative_eq!(out.srtr[3], 1.0);
    }

    #[test]
    fn test_constant_rtr_yields_nan() {
        let rtr = vec![0.02; 20];
        for method in [SrtrMethod::Iid, SrtrMethod::Cluster] {
            let out = srtr(SrtrConfig::new(3, 5).with_method(method), rtr.clone());
            assert_eq!(out.srtr.nan_count(), 20);
            assert!(out.variance[10] <= 1e-18);
        }
    }

    #[test]
    fn test_cluster_equals_iid_for_lag_zero() {
        let rtr = vec![0.01, 0.03, 0.02, 0.05, 0.04, 0.01, 0.02];
        let iid = srtr(SrtrConfig::new(2, 4).with_method(SrtrMethod::Iid), rtr.clone());
        let hac = srtr(SrtrConfig::new(2, 4).with_lag(0), rtr);

        for t in 0..7 {
            if iid.srtr[t].is_nan() {
                assert!(hac.srtr[t].is_nan());
            } else {
                assert_relative_eq!(iid.srtr[t], hac.srtr[t], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_cluster_inflates_trending_window() {
        // monotone windows have positive autocovariances
        let rtr: Vec<f64> = (1..=10).map(|i| f64::from(i) * 0.01).collect();
        let iid = srtr(SrtrConfig::new(3, 5).with_method(SrtrMethod::Iid), rtr.clone());
        let hac = srtr(SrtrConfig::new(3, 5), rtr);

        assert!(hac.variance[9] >= iid.variance[9]);
        assert!(hac.srtr[9].abs() <= iid.srtr[9].abs());
    }

    #[test]
    fn test_calculate_through_view() {
        let high = [10.0, 10.5, 11.0, 10.8, 11.5, 11.2];
        let low = [9.5, 9.8, 10.1, 10.2, 10.6, 10.7];
        let close = [10.0, 10.2, 10.9, 10.4, 11.3, 10.9];
        let view = OhlcvView::new()
            .with(Role::High, &high)
            .with(Role::Low, &low)
            .with(Role::Close, &close);

        let out = Srtr::<f64>::new(SrtrConfig::new(2, 3)).calculate(&view).unwrap();
        assert_eq!(out.srtr.len(), 6);
        assert!(out.srtr[0].is_nan());
        assert!(out.srtr[2].is_nan());
        assert!(out.srtr[3].is_finite());
        assert_eq!(out.into_columns().len(), 6);
    }
}
