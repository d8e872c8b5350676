//! Labeled numeric sequence.
//!
//! The [`Series`] type holds one column of values together with the row
//! [`Index`] they belong to. Missing values are represented by `NaN`.

use core::ops::Index as IndexOp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::Index;
use crate::num::TaFloat;

/// An ordered sequence of floating-point values with a stable row index.
///
/// `Series<T>` is both the input of sequence-scoped indicators and the output
/// of every indicator. Positions without a value hold `NaN`.
///
/// # Example
///
/// ```rust
/// use ti_core::{Index, Series};
///
/// let series: Series<f64> = Series::from_vec(vec![100.0, 101.5, 99.8]);
/// assert_eq!(series.len(), 3);
/// assert_eq!(series[1], 101.5);
/// assert_eq!(series.index(), &Index::range(3));
///
/// let stamped = series.with_index(Index::from_labels(vec![7, 8, 9])).unwrap();
/// assert_eq!(stamped.index().label(0), Some(7));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: TaFloat"))]
pub struct Series<T: TaFloat> {
    data: Vec<T>,
    index: Index,
}

impl<T: TaFloat> Default for Series<T> {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl<T: TaFloat> Series<T> {
    /// Create a series over a positional index.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        let index = Index::range(data.len());
        Self { data, index }
    }

    /// Create a series over an explicit index.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` does not cover exactly `data.len()` rows.
    pub fn with_labels(data: Vec<T>, index: Index) -> Result<Self> {
        index.check_len(data.len())?;
        Ok(Self { data, index })
    }

    /// Create a series of `len` missing values.
    #[must_use]
    pub fn nan(len: usize) -> Self {
        Self::from_vec(vec![T::NAN; len])
    }

    /// Replace the index, keeping the values.
    ///
    /// # Errors
    ///
    /// Returns an error if the new index has a different length.
    pub fn with_index(mut self, index: Index) -> Result<Self> {
        index.check_len(self.data.len())?;
        self.index = index;
        Ok(self)
    }

    /// Returns the row index.
    #[must_use]
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the series holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `position`, if in bounds.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.data.get(position)
    }

    /// Returns an iterator over the values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Returns the values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the series and returns the values.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Number of missing values.
    #[must_use]
    pub fn nan_count(&self) -> usize {
        self.data.iter().filter(|x| x.is_nan()).count()
    }

    /// Position of the first non-missing value.
    #[must_use]
    pub fn first_valid(&self) -> Option<usize> {
        self.data.iter().position(|x| !x.is_nan())
    }
}

impl<T: TaFloat> IndexOp<usize> for Series<T> {
    type Output = T;

    fn index(&self, position: usize) -> &Self::Output {
        &self.data[position]
    }
}

impl<T: TaFloat> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T: TaFloat> IntoIterator for &'a Series<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: TaFloat> From<Vec<T>> for Series<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: TaFloat> From<&[T]> for Series<T> {
    fn from(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }
}
