//! # ti-accessor
//!
//! Name-based dispatch for the rust-ti indicator engine.
//!
//! This crate connects bar tables and sequences to the indicators of
//! `ti-indicators`:
//!
//! - [`ColumnResolver`]: maps OHLCV roles onto arbitrary column labels
//! - [`Registry`]: catalog of indicators with parameter schemas and docs
//! - [`TableAccessor`] / [`SeriesAccessor`]: invoke an indicator by name with
//!   keyword parameters and get a result aligned to the input's index
//!
//! # Example
//!
//! ```
//! use ti_accessor::prelude::*;
//! use ti_core::DataFrame;
//!
//! let df: DataFrame<f64> = DataFrame::from_columns(vec![
//!     ("High", vec![10.0, 11.0, 12.5, 11.5, 13.0]),
//!     ("Low", vec![9.0, 9.5, 10.5, 10.0, 11.0]),
//!     ("Close", vec![9.5, 10.5, 11.0, 10.5, 12.5]),
//! ])
//! .unwrap();
//!
//! let ti = TableAccessor::new(&df);
//! let atr = ti.invoke("ATR", &Params::new().with("n", 2)).unwrap();
//! assert_eq!(atr.len(), 5);
//!
//! let err = ti.invoke("ATR", &Params::new().with("window", 2)).unwrap_err();
//! assert!(matches!(err, EngineError::InvalidParameter { .. }));
//! ```
//!
//! # Thread safety
//!
//! [`Registry::global`] holds only the built-ins and is immutable once built.
//! Custom indicators are never visible through [`TableAccessor::new`] or
//! [`SeriesAccessor::new`]: register them in a caller-owned [`Registry`]
//! (start from [`Registry::with_builtins`]) and bind it with
//! `with_registry`. That registry has no internal locking, so registering
//! while other threads read it is the caller's to synchronise.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod accessor;
mod builtins;
pub mod error;
mod output;
pub mod params;
pub mod registry;
pub mod resolver;

pub mod prelude;

pub use accessor::{SeriesAccessor, TableAccessor};
pub use error::{EngineError, Result};
pub use output::IndicatorOutput;
pub use params::{ParamKind, ParamSchema, ParamSpec, ParamValue, Params, ResolvedParams};
pub use registry::{ComputeFn, ComputeInput, Descriptor, InputSpec, Registry, Scope};
pub use resolver::{ColumnMap, ColumnResolver, CANDIDATES};
