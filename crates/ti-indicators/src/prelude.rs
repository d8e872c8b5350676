//! Prelude for ti-indicators.
//!
//! This module re-exports all commonly used types and traits.

// Volatility indicators
pub use crate::volatility::{
    Artr, ArtrConfig,
    Atr, AtrConfig,
    Rtr, RtrConfig,
    Srtr, SrtrConfig, SrtrMethod, SrtrOutput,
    TrueRange, TrueRangeConfig,
    ZigZag, ZigZagConfig, Pivot, PivotKind,
};

// Sequence indicators
pub use crate::trend::{
    Sma, SmaConfig,
    Ema, EmaConfig,
};
