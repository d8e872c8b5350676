//! # ti-indicators
//!
//! Indicator computations for the rust-ti engine.
//!
//! This crate provides batch implementations organized into two groups:
//!
//! - **Volatility**: TR, ATR, RTR, ARTR, the SRTR standardization engine, ZigZag
//! - **Trend**: SMA, EMA over a single sequence
//!
//! # Example
//!
//! ```
//! use ti_indicators::prelude::*;
//! use ti_core::prelude::*;
//!
//! let high = [105.0, 102.0];
//! let low = [95.0, 101.0];
//! let close = [90.0, 95.0];
//! let view = OhlcvView::new()
//!     .with(Role::High, &high)
//!     .with(Role::Low, &low)
//!     .with(Role::Close, &close);
//!
//! let tr = TrueRange::<f64>::new(TrueRangeConfig).calculate(&view).unwrap();
//! assert!(tr[0].is_nan());
//! assert_eq!(tr[1], 12.0);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod trend;
pub mod volatility;

pub mod prelude;

pub use prelude::*;
