//! Sequence indicators.
//!
//! This module contains moving averages over a single series:
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)

mod sma;
mod ema;

pub use sma::{Sma, SmaConfig};
pub use ema::{Ema, EmaConfig};
