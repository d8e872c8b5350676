//! Prelude for ti-accessor.
//!
//! This module re-exports all commonly used types.

pub use crate::accessor::{SeriesAccessor, TableAccessor};
pub use crate::error::EngineError;
pub use crate::output::IndicatorOutput;
pub use crate::params::{ParamKind, ParamSchema, ParamSpec, ParamValue, Params, ResolvedParams};
pub use crate::registry::{ComputeFn, ComputeInput, Descriptor, InputSpec, Registry, Scope};
pub use crate::resolver::{ColumnMap, ColumnResolver};
