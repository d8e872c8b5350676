//! Row index shared by series and tables.
//!
//! Every [`Series`](crate::Series) and [`DataFrame`](crate::DataFrame) carries an
//! [`Index`] so that indicator outputs can be returned aligned to the rows they
//! were computed from. Labels are shared behind an `Arc`, so stamping the index
//! of an input onto a result never copies the labels.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};

/// Labels identifying the rows of a series or table.
///
/// # Example
///
/// ```rust
/// use ti_core::Index;
///
/// let range = Index::range(3);
/// assert_eq!(range.label(2), Some(2));
///
/// let stamped = Index::from_labels(vec![1_700_000_000_000, 1_700_000_060_000]);
/// assert_eq!(stamped.len(), 2);
/// assert_eq!(stamped.label(1), Some(1_700_000_060_000));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Index {
    /// Positional labels `0..len`.
    Range(usize),
    /// Explicit labels, typically epoch-millisecond timestamps.
    Labels(Arc<[i64]>),
}

impl Default for Index {
    fn default() -> Self {
        Self::Range(0)
    }
}

impl Index {
    /// Positional index of the given length.
    #[must_use]
    pub fn range(len: usize) -> Self {
        Self::Range(len)
    }

    /// Index over explicit labels.
    #[must_use]
    pub fn from_labels(labels: Vec<i64>) -> Self {
        Self::Labels(labels.into())
    }

    /// Number of rows covered by the index.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Range(len) => *len,
            Self::Labels(labels) => labels.len(),
        }
    }

    /// Returns `true` if the index covers no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of the row at `position`, if in bounds.
    #[must_use]
    pub fn label(&self, position: usize) -> Option<i64> {
        match self {
            Self::Range(len) => (position < *len).then(|| position as i64),
            Self::Labels(labels) => labels.get(position).copied(),
        }
    }

    /// Returns `true` for a positional index.
    #[must_use]
    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range(_))
    }

    /// Fails unless the index covers exactly `len` rows.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::IndexMismatch`] on a length difference.
    pub fn check_len(&self, len: usize) -> Result<()> {
        if self.len() == len {
            Ok(())
        } else {
            Err(IndicatorError::IndexMismatch {
                index_len: self.len(),
                data_len: len,
            })
        }
    }

    /// Iterate over all labels in row order.
    pub fn labels(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.len()).filter_map(move |i| self.label(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_labels() {
        let index = Index::range(3);
        assert_eq!(index.labels().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(index.label(3), None);
        assert!(index.is_range());
    }

    #[test]
    fn test_explicit_labels() {
        let index = Index::from_labels(vec![10, 20, 30]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.label(0), Some(10));
        assert!(!index.is_range());
    }

    #[test]
    fn test_check_len() {
        let index = Index::from_labels(vec![1, 2]);
        assert!(index.check_len(2).is_ok());
        assert!(matches!(
            index.check_len(3),
            Err(IndicatorError::IndexMismatch { index_len: 2, data_len: 3 })
        ));
    }

    #[test]
    fn test_clone_shares_labels() {
        let index = Index::from_labels(vec![5, 6, 7]);
        let copy = index.clone();
        if let (Index::Labels(a), Index::Labels(b)) = (&index, &copy) {
            assert!(Arc::ptr_eq(a, b));
        } else {
            panic!("expected labelled index");
        }
    }
}
