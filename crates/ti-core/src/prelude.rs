//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits from ti-core.
//!
//! # Example
//!
//! ```rust
//! use ti_core::prelude::*;
//!
//! let series: Series<f64> = Series::from_vec(vec![1.0, 2.0]);
//! let view = OhlcvView::new().with(Role::Close, series.as_slice());
//! assert_eq!(view.len(), 2);
//! ```

// Core types
pub use crate::dataframe::DataFrame;
pub use crate::index::Index;
pub use crate::num::TaFloat;
pub use crate::ohlcv::{OhlcvView, Role};
pub use crate::series::Series;
pub use crate::window::RingBuffer;

// Error types
pub use crate::error::{IndicatorError, Result};

// Traits
pub use crate::traits::{Indicator, IndicatorConfig, SeriesIndicator};

// Utility functions
pub use crate::utils::{ema, mean, rolling_mean, sample_variance, true_range};
