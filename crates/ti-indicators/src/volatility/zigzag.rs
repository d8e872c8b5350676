//! ZigZag swing-pivot detector.
//!
//! ZigZag filters out price moves smaller than a percentage threshold and marks
//! the swing highs and lows that remain. A pivot is confirmed only once price
//! has moved at least `pct` away from it in the opposite direction, so the most
//! recent swing extreme stays an unconfirmed candidate.

use ti_core::{
    error::{IndicatorError, Result},
    num::TaFloat,
    ohlcv::{OhlcvView, Role},
    series::Series,
    traits::Indicator,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the ZigZag indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZigZagConfig {
    /// Minimum relative reversal that confirms a pivot (default: 0.05).
    pub pct: f64,
}

impl Default for ZigZagConfig {
    fn default() -> Self {
        Self { pct: 0.05 }
    }
}

impl ZigZagConfig {
    /// Create a new ZigZag configuration with the given threshold.
    pub fn new(pct: f64) -> Self {
        Self { pct }
    }

    fn validate(&self) -> Result<()> {
        if self.pct.is_finite() && self.pct > 0.0 {
            Ok(())
        } else {
            Err(IndicatorError::invalid_parameter("pct", self.pct, "> 0"))
        }
    }
}

/// Kind of swing pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PivotKind {
    /// Swing high, taken from the High column.
    High,
    /// Swing low, taken from the Low column.
    Low,
}

/// A swing extreme at a row position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: TaFloat"))]
pub struct Pivot<T: TaFloat> {
    /// Row position of the extreme.
    pub position: usize,
    /// Price of the extreme.
    pub price: T,
    /// High or low.
    pub kind: PivotKind,
}

#[derive(Debug, Clone, Copy)]
struct Extreme<T> {
    price: T,
    position: usize,
}

/// ZigZag indicator with a stateful per-bar [`update`](ZigZag::update).
///
/// Batch [`calculate`](Indicator::calculate) runs a fresh state machine over the
/// whole input and returns the confirmed pivot prices at their rows, plus the
/// current candidate at its row, `NaN` elsewhere. Rows with a missing price or
/// `high < low` are skipped.
#[derive(Debug, Clone)]
pub struct ZigZag<T: TaFloat> {
    config: ZigZagConfig,
    rows: usize,
    last: Option<PivotKind>,
    swing_high: Extreme<T>,
    swing_low: Extreme<T>,
    candidate: Option<Pivot<T>>,
    confirmed: Vec<Pivot<T>>,
}

impl<T: TaFloat> ZigZag<T> {
    /// Process one bar and return the pivot it confirmed, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured threshold is not positive.
    pub fn update(&mut self, high: T, low: T) -> Result<Option<Pivot<T>>> {
        self.config.validate()?;
        let position = self.rows;
        self.rows += 1;

        if high.is_nan() || low.is_nan() || high < low {
            return Ok(None);
        }
        self.track_swings(high, low, position);

        let pct = T::from_f64_lossy(self.config.pct);
        let rise = (self.swing_high.price - self.swing_low.price).safe_div(self.swing_low.price);
        let drop = (self.swing_high.price - self.swing_low.price).safe_div(self.swing_high.price);

        let mut newly = None;
        match self.last {
            None => {
                if self.swing_low.position < self.swing_high.position {
                    if rise >= pct {
                        newly = Some(self.confirm(PivotKind::Low, position));
                    } else {
                        self.candidate = Some(self.extreme(PivotKind::Low));
                    }
                } else if self.swing_high.position < self.swing_low.position {
                    if drop >= pct {
                        newly = Some(self.confirm(PivotKind::High, position));
                    } else {
                        self.candidate = Some(self.extreme(PivotKind::High));
                    }
                }
            }
            Some(PivotKind::High) => {
                if rise >= pct {
                    newly = Some(self.confirm(PivotKind::Low, position));
                } else {
                    self.candidate = Some(self.extreme(PivotKind::Low));
                }
            }
            Some(PivotKind::Low) => {
                if drop >= pct {
                    newly = Some(self.confirm(PivotKind::High, position));
                } else {
                    self.candidate = Some(self.extreme(PivotKind::High));
                }
            }
        }
        Ok(newly)
    }

    /// Confirmed pivots in row order.
    #[must_use]
    pub fn pivots(&self) -> &[Pivot<T>] {
        &self.confirmed
    }

    /// The most recent unconfirmed swing extreme.
    #[must_use]
    pub fn candidate(&self) -> Option<Pivot<T>> {
        self.candidate
    }

    /// Number of bars processed.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Pivot prices at their rows and the candidate at its row, `NaN` elsewhere.
    #[must_use]
    pub fn to_series(&self) -> Series<T> {
        let mut values = vec![T::NAN; self.rows];
        for pivot in self.confirmed.iter().chain(self.candidate.iter()) {
            values[pivot.position] = pivot.price;
        }
        Series::from_vec(values)
    }

    /// Forget all processed bars.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    fn track_swings(&mut self, high: T, low: T, position: usize) {
        match self.last {
            None => {
                if high > self.swing_high.price {
                    self.swing_high = Extreme { price: high, position };
                }
                if low < self.swing_low.price {
                    self.swing_low = Extreme { price: low, position };
                }
            }
            // seeking a low: a new low restarts the rebound high
            Some(PivotKind::High) => {
                if low < self.swing_low.price {
                    self.swing_low = Extreme { price: low, position };
                    self.swing_high = Extreme { price: T::NEG_INFINITY, position };
                } else if high > self.swing_high.price {
                    self.swing_high = Extreme { price: high, position };
                }
            }
            // seeking a high: a new high restarts the pullback low
            Some(PivotKind::Low) => {
                if high > self.swing_high.price {
                    self.swing_high = Extreme { price: high, position };
                    self.swing_low = Extreme { price: T::INFINITY, position };
                } else if low < self.swing_low.price {
                    self.swing_low = Extreme { price: low, position };
                }
            }
        }
    }

    fn extreme(&self, kind: PivotKind) -> Pivot<T> {
        let e = match kind {
            PivotKind::High => self.swing_high,
            PivotKind::Low => self.swing_low,
        };
        Pivot {
            position: e.position,
            price: e.price,
            kind,
        }
    }

    /// Confirm the tracked extreme of `kind`; the opposite extreme becomes the
    /// new candidate.
    fn confirm(&mut self, kind: PivotKind, position: usize) -> Pivot<T> {
        let pivot = self.extreme(kind);
        self.confirmed.push(pivot);
        self.last = Some(kind);
        match kind {
            PivotKind::Low => {
                self.swing_low = Extreme { price: T::INFINITY, position };
                self.candidate = Some(self.extreme(PivotKind::High));
            }
            PivotKind::High => {
                self.swing_high = Extreme { price: T::NEG_INFINITY, position };
                self.candidate = Some(self.extreme(PivotKind::Low));
            }
        }
        tracing::trace!(position = pivot.position, ?kind, "zigzag pivot confirmed");
        pivot
    }
}

impl<T: TaFloat> Indicator<T> for ZigZag<T> {
    type Output = Series<T>;
    type Config = ZigZagConfig;

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            rows: 0,
            last: None,
            swing_high: Extreme { price: T::NEG_INFINITY, position: 0 },
            swing_low: Extreme { price: T::INFINITY, position: 0 },
            candidate: None,
            confirmed: Vec::new(),
        }
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn required_roles(&self) -> &'static [Role] {
        &[Role::High, Role::Low]
    }

    fn calculate(&self, data: &OhlcvView<'_, T>) -> Result<Self::Output> {
        self.config.validate()?;
        let high = data.require(Role::High)?;
        let low = data.require(Role::Low)?;
        data.check_lengths()?;

        let mut state = Self::new(self.config.clone());
        for (&h, &l) in high.iter().zip(low) {
            state.update(h, l)?;
        }
        tracing::debug!(
            rows = state.rows,
            pivots = state.confirmed.len(),
            "zigzag computed"
        );
        Ok(state.to_series())
    }
}
