//! Dispatch results.

use ti_core::{DataFrame, Index, Series};

use crate::error::Result;

/// Result of an indicator call, aligned to the bound input's index.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutput {
    /// A single result sequence.
    Series(Series<f64>),
    /// Several parallel sequences, e.g. SRTR with `full = true`.
    Frame(DataFrame<f64>),
}

impl IndicatorOutput {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            IndicatorOutput::Series(s) => s.len(),
            IndicatorOutput::Frame(df) => df.len(),
        }
    }

    /// Whether the output has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row index of the output.
    #[must_use]
    pub fn index(&self) -> &Index {
        match self {
            IndicatorOutput::Series(s) => s.index(),
            IndicatorOutput::Frame(df) => df.index(),
        }
    }

    /// The sequence, if this is a single-sequence result.
    #[must_use]
    pub fn as_series(&self) -> Option<&Series<f64>> {
        match self {
            IndicatorOutput::Series(s) => Some(s),
            IndicatorOutput::Frame(_) => None,
        }
    }

    /// The table, if this is a multi-sequence result.
    #[must_use]
    pub fn as_frame(&self) -> Option<&DataFrame<f64>> {
        match self {
            IndicatorOutput::Series(_) => None,
            IndicatorOutput::Frame(df) => Some(df),
        }
    }

    /// Consume into the sequence, if this is a single-sequence result.
    #[must_use]
    pub fn into_series(self) -> Option<Series<f64>> {
        match self {
            IndicatorOutput::Series(s) => Some(s),
            IndicatorOutput::Frame(_) => None,
        }
    }

    /// Consume into the table, if this is a multi-sequence result.
    #[must_use]
    pub fn into_frame(self) -> Option<DataFrame<f64>> {
        match self {
            IndicatorOutput::Series(_) => None,
            IndicatorOutput::Frame(df) => Some(df),
        }
    }

    /// Re-label every row with `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` does not cover the output's rows.
    pub fn with_index(self, index: Index) -> Result<Self> {
        match self {
            IndicatorOutput::Series(s) => Ok(IndicatorOutput::Series(s.with_index(index)?)),
            IndicatorOutput::Frame(df) => {
                index.check_len(df.len())?;
                let mut stamped = DataFrame::with_index(index);
                for (name, column) in df.iter() {
                    stamped.add_column(name, column.clone())?;
                }
                Ok(IndicatorOutput::Frame(stamped))
            }
        }
    }
}

impl From<Series<f64>> for IndicatorOutput {
    fn from(series: Series<f64>) -> Self {
        IndicatorOutput::Series(series)
    }
}

impl From<DataFrame<f64>> for IndicatorOutput {
    fn from(df: DataFrame<f64>) -> Self {
        IndicatorOutput::Frame(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_restamped() {
        let out = IndicatorOutput::from(Series::from_vec(vec![1.0, 2.0]));
        let out = out.with_index(Index::from_labels(vec![10, 20])).unwrap();
        assert_eq!(out.index().label(1), Some(20));
        assert_eq!(out.as_series().unwrap().index().label(0), Some(10));
    }

    #[test]
    fn test_frame_restamped() {
        let df = DataFrame::from_columns(vec![("a", vec![1.0, 2.0]), ("b", vec![3.0, 4.0])]).unwrap();
        let out = IndicatorOutput::from(df)
            .with_index(Index::from_labels(vec![5, 6]))
            .unwrap();
        let frame = out.as_frame().unwrap();
        assert_eq!(frame.column_names(), vec!["a", "b"]);
        assert_eq!(frame.get_column("b").unwrap().index().label(1), Some(6));
    }

    #[test]
    fn test_wrong_length_index() {
        let out = IndicatorOutput::from(Series::from_vec(vec![1.0, 2.0]));
        assert!(out.with_index(Index::range(3)).is_err());
    }
}
