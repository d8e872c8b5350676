//! Volatility indicators.
//!
//! This module contains the range-based volatility family and the tools
//! built on it:
//! - TR (True Range)
//! - ATR (Average True Range)
//! - RTR (Relative True Range)
//! - ARTR (Average Relative True Range)
//! - SRTR (Standardized Relative True Range)
//! - ZigZag swing pivots

mod artr;
mod atr;
pub mod hac;
mod rtr;
mod srtr;
mod tr;
mod zigzag;

pub use artr::{Artr, ArtrConfig};
pub use atr::{Atr, AtrConfig};
pub use rtr::{Rtr, RtrConfig};
pub use srtr::{Srtr, SrtrConfig, SrtrMethod, SrtrOutput};
pub use tr::{TrueRange, TrueRangeConfig};
pub use zigzag::{Pivot, PivotKind, ZigZag, ZigZagConfig};
