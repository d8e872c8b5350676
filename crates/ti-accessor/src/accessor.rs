//! Dispatch façades.
//!
//! A façade is bound to one table or sequence and invokes registered
//! indicators by name. Calls are pure: the bound input is only borrowed and
//! the result carries the input's row index.

use ti_core::{DataFrame, IndicatorError, OhlcvView, Role, Series};

use crate::error::{EngineError, Result};
use crate::output::IndicatorOutput;
use crate::params::Params;
use crate::registry::{ComputeInput, Descriptor, InputSpec, Registry, Scope};
use crate::resolver::{ColumnMap, ColumnResolver};

fn check_output(name: &str, output: &IndicatorOutput, rows: usize) -> Result<()> {
    if output.len() == rows {
        Ok(())
    } else {
        tracing::warn!(indicator = name, rows, returned = output.len(), "output length mismatch");
        Err(IndicatorError::LengthMismatch {
            expected: rows,
            actual: output.len(),
        }
        .into())
    }
}

fn listing(registry: &Registry, scope: Scope) -> Vec<(&str, &str)> {
    registry
        .list(scope)
        .map(|d| (d.name(), d.title()))
        .collect()
}

/// Façade over a bar table.
///
/// # Example
///
/// ```rust
/// use ti_accessor::{Params, TableAccessor};
/// use ti_core::DataFrame;
///
/// let df: DataFrame<f64> = DataFrame::from_columns(vec![
///     ("high", vec![101.0, 105.0, 102.0]),
///     ("low", vec![99.0, 95.0, 101.0]),
///     ("close", vec![100.0, 90.0, 95.0]),
/// ])
/// .unwrap();
///
/// let ti = TableAccessor::new(&df);
/// let tr = ti.invoke("TR", &Params::new()).unwrap().into_series().unwrap();
/// assert!(tr[0].is_nan());
/// assert_eq!(tr[1], 10.0);
/// assert_eq!(tr[2], 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct TableAccessor<'a> {
    table: &'a DataFrame<f64>,
    registry: &'a Registry,
    resolver: ColumnResolver,
}

impl<'a> TableAccessor<'a> {
    /// Bind to `table` using the global registry.
    #[must_use]
    pub fn new(table: &'a DataFrame<f64>) -> Self {
        Self::with_registry(table, Registry::global())
    }

    /// Bind to `table` using a caller-owned registry.
    #[must_use]
    pub fn with_registry(table: &'a DataFrame<f64>, registry: &'a Registry) -> Self {
        Self {
            table,
            registry,
            resolver: ColumnResolver::new(),
        }
    }

    /// The bound table.
    #[must_use]
    pub fn table(&self) -> &'a DataFrame<f64> {
        self.table
    }

    /// Merge role overrides into the current ones.
    ///
    /// Every label is checked before any is applied, so a failed call leaves
    /// the overrides unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingColumn`] if a label is not a column of
    /// the bound table.
    pub fn set_column_mapping<I, S>(&mut self, mapping: I) -> Result<()>
    where
        I: IntoIterator<Item = (Role, S)>,
        S: Into<String>,
    {
        let mapping: Vec<(Role, String)> = mapping
            .into_iter()
            .map(|(role, label)| (role, label.into()))
            .collect();
        if let Some((_, label)) = mapping.iter().find(|(_, l)| !self.table.has_column(l)) {
            return Err(EngineError::MissingColumn(label.clone()));
        }
        for (role, label) in mapping {
            tracing::debug!(%role, column = %label, "column override set");
            self.resolver.set_override(role, label);
        }
        Ok(())
    }

    /// Drop the override for `role`, returning it.
    pub fn clear_column_mapping(&mut self, role: Role) -> Option<String> {
        self.resolver.clear_override(role)
    }

    /// Roles resolved against the bound table with the current overrides.
    #[must_use]
    pub fn column_mapping(&self) -> ColumnMap {
        self.resolver.resolve(self.table)
    }

    /// Names and titles of table indicators, in registration order.
    #[must_use]
    pub fn indicators(&self) -> Vec<(&'a str, &'a str)> {
        listing(self.registry, Scope::Table)
    }

    /// Descriptor of a table indicator.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownIndicator`] if `name` is not registered.
    pub fn help(&self, name: &str) -> Result<&'a Descriptor> {
        self.registry.describe(Scope::Table, name)
    }

    /// Compute indicator `name` with keyword `params`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownIndicator`] if `name` is not a table indicator
    /// - [`EngineError::MissingInput`] if a declared role does not resolve
    /// - [`EngineError::InvalidParameter`] if `params` fail the schema
    /// - [`EngineError::Indicator`] if the computation fails
    pub fn invoke(&self, name: &str, params: &Params) -> Result<IndicatorOutput> {
        let descriptor = self.registry.lookup(Scope::Table, name)?;
        let InputSpec::Roles(roles) = descriptor.inputs() else {
            return Err(EngineError::InvalidDescriptor {
                name: name.to_string(),
                reason: "table indicator without roles".to_string(),
            });
        };

        let map = self.resolver.resolve(self.table);
        let mut view = OhlcvView::new();
        for &role in roles {
            let label = map.require(role)?;
            let column = self
                .table
                .get_column(label)
                .ok_or_else(|| EngineError::MissingColumn(label.to_string()))?;
            view = view.with(role, column.as_slice());
        }

        let bound = descriptor.params().bind(params)?;
        tracing::debug!(
            indicator = name,
            scope = %Scope::Table,
            rows = self.table.len(),
            "invoking indicator"
        );
        let output = (descriptor.compute())(ComputeInput::Table(view), &bound)?;
        check_output(name, &output, self.table.len())?;
        output.with_index(self.table.index().clone())
    }
}

/// Façade over a single sequence.
///
/// # Example
///
/// ```rust
/// use ti_accessor::{Params, SeriesAccessor};
/// use ti_core::{Index, Series};
///
/// let closes = Series::with_labels(vec![1.0, 2.0, 3.0], Index::from_labels(vec![7, 8, 9])).unwrap();
/// let sma = SeriesAccessor::new(&closes)
///     .invoke("SMA", &Params::new().with("n", 2))
///     .unwrap()
///     .into_series()
///     .unwrap();
/// assert_eq!(sma[2], 2.5);
/// assert_eq!(sma.index().label(2), Some(9));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SeriesAccessor<'a> {
    series: &'a Series<f64>,
    registry: &'a Registry,
}

impl<'a> SeriesAccessor<'a> {
    /// Bind to `series` using the global registry.
    #[must_use]
    pub fn new(series: &'a Series<f64>) -> Self {
        Self::with_registry(series, Registry::global())
    }

    /// Bind to `series` using a caller-owned registry.
    #[must_use]
    pub fn with_registry(series: &'a Series<f64>, registry: &'a Registry) -> Self {
        Self { series, registry }
    }

    /// The bound sequence.
    #[must_use]
    pub fn series(&self) -> &'a Series<f64> {
        self.series
    }

    /// Names and titles of sequence indicators, in registration order.
    #[must_use]
    pub fn indicators(&self) -> Vec<(&'a str, &'a str)> {
        listing(self.registry, Scope::Sequence)
    }

    /// Descriptor of a sequence indicator.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownIndicator`] if `name` is not registered.
    pub fn help(&self, name: &str) -> Result<&'a Descriptor> {
        self.registry.describe(Scope::Sequence, name)
    }

    /// Compute indicator `name` with keyword `params`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnknownIndicator`] if `name` is not a sequence indicator
    /// - [`EngineError::InvalidParameter`] if `params` fail the schema
    /// - [`EngineError::Indicator`] if the computation fails
    pub fn invoke(&self, name: &str, params: &Params) -> Result<IndicatorOutput> {
        let descriptor = self.registry.lookup(Scope::Sequence, name)?;
        let bound = descriptor.params().bind(params)?;
        tracing::debug!(
            indicator = name,
            scope = %Scope::Sequence,
            rows = self.series.len(),
            "invoking indicator"
        );
        let output = (descriptor.compute())(ComputeInput::Sequence(self.series.as_slice()), &bound)?;
        check_output(name, &output, self.series.len())?;
        output.with_index(self.series.index().clone())
    }
}
