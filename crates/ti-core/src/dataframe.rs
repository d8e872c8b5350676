//! Bar table: named columns over a shared row index.
//!
//! The [`DataFrame`] type is the labeled numeric table that table-scoped
//! indicators read from. Columns keep insertion order (`IndexMap`), which makes
//! column-role resolution and indicator listings deterministic.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::index::Index;
use crate::num::TaFloat;
use crate::series::Series;

/// A column-oriented table of equally long series sharing one row [`Index`].
///
/// Column labels are arbitrary caller-supplied strings. The table never
/// reorders, adds or removes rows on its own.
///
/// # Example
///
/// ```rust
/// use ti_core::{DataFrame, Series};
///
/// let mut df: DataFrame<f64> = DataFrame::new();
/// df.add_column("Close", Series::from_vec(vec![100.0, 101.0, 102.0])).unwrap();
/// df.add_column("Vol", Series::from_vec(vec![1000.0, 1100.0, 1200.0])).unwrap();
///
/// assert_eq!(df.len(), 3);
/// assert_eq!(df.column_names(), vec!["Close", "Vol"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: TaFloat"))]
pub struct DataFrame<T: TaFloat> {
    columns: IndexMap<String, Series<T>>,
    index: Index,
}

impl<T: TaFloat> Default for DataFrame<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TaFloat> DataFrame<T> {
    /// Create an empty table. The first column added fixes the row count.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
            index: Index::range(0),
        }
    }

    /// Create an empty table over a given row index.
    #[must_use]
    pub fn with_index(index: Index) -> Self {
        Self {
            columns: IndexMap::new(),
            index,
        }
    }

    /// Create a table from `(label, values)` pairs over a positional index.
    ///
    /// # Errors
    ///
    /// Returns an error on unequal column lengths or duplicate labels.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<T>)>) -> Result<Self> {
        let mut df = Self::new();
        for (name, values) in columns {
            df.add_column(name, Series::from_vec(values))?;
        }
        Ok(df)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the row index.
    #[must_use]
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column labels in insertion order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get a column by label.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Series<T>> {
        self.columns.get(name)
    }

    /// Append a new column. The column is re-labelled with the table's index.
    ///
    /// When the table has no columns and a positional index, the first column
    /// fixes the row count.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is taken or the length differs.
    pub fn add_column(&mut self, name: impl Into<String>, series: Series<T>) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(IndicatorError::InvalidParameter {
                name: "column_name",
                value: name,
                expected: "unique column name",
            });
        }
        self.insert(name, series)
    }

    /// Add or replace a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the length differs from the table's row count.
    pub fn set_column(&mut self, name: impl Into<String>, series: Series<T>) -> Result<()> {
        self.insert(name.into(), series)
    }

    fn insert(&mut self, name: String, series: Series<T>) -> Result<()> {
        if self.columns.is_empty() && self.index.is_range() {
            self.index = Index::range(series.len());
        }
        if series.len() != self.len() {
            return Err(IndicatorError::LengthMismatch {
                expected: self.len(),
                actual: series.len(),
            });
        }
        let series = series.with_index(self.index.clone())?;
        self.columns.insert(name, series);
        Ok(())
    }

    /// Returns an iterator over `(label, series)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Series<T>)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}
