//! Error types for indicator computation.
//!
//! This module provides the structured error type returned by the computation
//! layer, with error chaining support via `thiserror`.

use thiserror::Error;

use crate::ohlcv::Role;

/// Result type alias for indicator operations that may fail.
pub type Result<T> = core::result::Result<T, IndicatorError>;

/// Errors that can occur during indicator computation.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// Invalid window size parameter.
    #[error("Invalid window size: {0} (must be > 0)")]
    InvalidWindow(usize),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {value} (expected {expected})")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Provided value as string.
        value: String,
        /// Description of expected value.
        expected: &'static str,
    },

    /// Series length mismatch in computation.
    #[error("Series length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A price role the indicator reads was not supplied.
    #[error("Missing input column for role {0}")]
    MissingInput(Role),

    /// Row index does not cover the data.
    #[error("Index covers {index_len} rows but data has {data_len}")]
    IndexMismatch {
        /// Rows covered by the index.
        index_len: usize,
        /// Rows of data.
        data_len: usize,
    },
}

impl IndicatorError {
    /// Shorthand for an [`IndicatorError::InvalidParameter`].
    #[must_use]
    pub fn invalid_parameter(
        name: &'static str,
        value: impl core::fmt::Display,
        expected: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_error_display() {
        let err = IndicatorError::InvalidWindow(0);
        assert_eq!(err.to_string(), "Invalid window size: 0 (must be > 0)");

        let err = IndicatorError::invalid_parameter("N", 10, "greater than n");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'N': 10 (expected greater than n)"
        );
    }

    #[test]
    fn test_missing_input_names_role() {
        let err = IndicatorError::MissingInput(Role::High);
        assert_eq!(err.to_string(), "Missing input column for role High");
    }

    #[test]
    fn test_index_mismatch_display() {
        let err = IndicatorError::IndexMismatch {
            index_len: 3,
            data_len: 4,
        };
        assert_eq!(err.to_string(), "Index covers 3 rows but data has 4");
    }
}
