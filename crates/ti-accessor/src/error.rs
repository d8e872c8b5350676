//! Error types for dispatch.
//!
//! Resolution, lookup and validation failures are raised to the caller as
//! [`EngineError`]. Computation failures from the indicator layer are wrapped
//! unchanged.

use thiserror::Error;
use ti_core::{IndicatorError, Role};

use crate::registry::Scope;

/// Result type alias for dispatch operations that may fail.
pub type Result<T> = core::result::Result<T, EngineError>;

/// Errors raised by the column resolver, the registry and the façades.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A role the indicator reads could not be mapped to any column.
    #[error("Missing required input for role {role} (tried: {})", .candidates.join(", "))]
    MissingInput {
        /// The unresolved role.
        role: Role,
        /// Every label that was tried, in order.
        candidates: Vec<String>,
    },

    /// A column override names a label the table does not have.
    #[error("Column '{0}' not found in table")]
    MissingColumn(String),

    /// No indicator of that name is registered for the scope.
    #[error("Indicator not found: '{name}' is not a {scope} indicator")]
    UnknownIndicator {
        /// Scope that was searched.
        scope: Scope,
        /// Requested name.
        name: String,
    },

    /// A keyword parameter is unknown, missing, mistyped or out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// An indicator is already registered under the same scope and name.
    #[error("Indicator '{name}' is already registered as a {scope} indicator")]
    DuplicateIndicator {
        /// Scope of the existing registration.
        scope: Scope,
        /// Colliding name.
        name: String,
    },

    /// An indicator or parameter name is not a legal identifier.
    #[error("Invalid name '{0}': expected an identifier")]
    InvalidName(String),

    /// A descriptor is inconsistent with the scope it is registered under.
    #[error("Invalid descriptor '{name}': {reason}")]
    InvalidDescriptor {
        /// Indicator name.
        name: String,
        /// What was inconsistent.
        reason: String,
    },

    /// Computation failed inside the indicator.
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
}

impl EngineError {
    pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_lists_candidates() {
        let err = EngineError::MissingInput {
            role: Role::High,
            candidates: vec!["High".into(), "high".into()],
        };
        assert_eq!(
            err.to_string(),
            "Missing required input for role High (tried: High, high)"
        );
    }

    #[test]
    fn test_unknown_indicator_names_scope() {
        let err = EngineError::UnknownIndicator {
            scope: Scope::Sequence,
            name: "ATR".into(),
        };
        assert_eq!(
            err.to_string(),
            "Indicator not found: 'ATR' is not a sequence indicator"
        );
    }

    #[test]
    fn test_indicator_error_is_wrapped() {
        let err: EngineError = IndicatorError::InvalidWindow(0).into();
        assert_eq!(err.to_string(), "Invalid window size: 0 (must be > 0)");
    }
}
