//! # ti-core
//!
//! Core types and traits for the rust-ti indicator engine.
//!
//! This crate provides the foundational abstractions used throughout the workspace:
//!
//! - [`TaFloat`] - Trait for numeric types (f32/f64)
//! - [`Series`] - Labeled numeric sequence
//! - [`DataFrame`] - Bar table with deterministic column ordering
//! - [`Index`] - Row labels shared by series and tables
//! - [`Role`] and [`OhlcvView`] - Semantic price roles and the columns bound to them
//! - [`RingBuffer`] - Circular buffer for trailing windows
//! - [`Indicator`] and [`SeriesIndicator`] - Indicator computation traits
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```rust
//! use ti_core::prelude::*;
//!
//! let closes: Series<f64> = Series::from_vec(vec![100.0, 101.5, 99.8, 102.3, 101.0]);
//! let sma = rolling_mean(closes.as_slice(), 3);
//! assert_eq!(sma.len(), closes.len());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod dataframe;
pub mod error;
pub mod index;
pub mod num;
pub mod ohlcv;
pub mod prelude;
pub mod series;
pub mod traits;
pub mod utils;
pub mod window;

// Re-export core types at crate root
pub use dataframe::DataFrame;
pub use error::{IndicatorError, Result};
pub use index::Index;
pub use num::TaFloat;
pub use ohlcv::{OhlcvView, Role};
pub use series::Series;
pub use traits::{Indicator, IndicatorConfig, SeriesIndicator};
pub use window::RingBuffer;
