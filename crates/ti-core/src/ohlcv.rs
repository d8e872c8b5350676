//! OHLCV (Open, High, Low, Close, Volume) price roles.
//!
//! A bar table may label its price columns in many ways. Indicators never see
//! those labels: they read from an [`OhlcvView`], which maps each semantic
//! [`Role`] to the column resolved for it.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IndicatorError, Result};
use crate::num::TaFloat;

/// Semantic price role of a bar-table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
}

impl Role {
    /// All roles in canonical order.
    pub const ALL: [Role; 5] = [Role::Open, Role::High, Role::Low, Role::Close, Role::Volume];

    /// Canonical name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Open => "Open",
            Role::High => "High",
            Role::Low => "Low",
            Role::Close => "Close",
            Role::Volume => "Volume",
        }
    }

    /// Position of the role in [`Role::ALL`].
    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed price columns keyed by [`Role`].
///
/// A view holds only the roles an indicator declared; asking for any other
/// role fails with [`IndicatorError::MissingInput`].
///
/// # Example
///
/// ```rust
/// use ti_core::{OhlcvView, Role};
///
/// let high = [10.0, 12.0];
/// let low = [8.0, 9.0];
/// let view = OhlcvView::new()
///     .with(Role::High, &high)
///     .with(Role::Low, &low);
///
/// assert_eq!(view.len(), 2);
/// assert!(view.require(Role::Close).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct OhlcvView<'a, T: TaFloat> {
    columns: [Option<&'a [T]>; 5],
}

impl<'a, T: TaFloat> OhlcvView<'a, T> {
    /// Create an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self { columns: [None; 5] }
    }

    /// Attach a column for `role`, replacing any earlier one.
    #[must_use]
    pub fn with(mut self, role: Role, values: &'a [T]) -> Self {
        self.columns[role.ordinal()] = Some(values);
        self
    }

    /// Column for `role`, if present.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<&'a [T]> {
        self.columns[role.ordinal()]
    }

    /// Column for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::MissingInput`] if the role is absent.
    pub fn require(&self, role: Role) -> Result<&'a [T]> {
        self.get(role).ok_or(IndicatorError::MissingInput(role))
    }

    /// Roles present in the view, in canonical order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL
            .into_iter()
            .filter(move |role| self.columns[role.ordinal()].is_some())
    }

    /// Row count of the view. All present columns share it.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .map(|c| c.len())
            .next()
            .unwrap_or(0)
    }

    /// Returns `true` if the view has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every present column has the same length.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::LengthMismatch`] on the first disagreeing column.
    pub fn check_lengths(&self) -> Result<()> {
        let expected = self.len();
        for column in self.columns.iter().flatten() {
            if column.len() != expected {
                return Err(IndicatorError::LengthMismatch {
                    expected,
                    actual: column.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        let names: Vec<_> = Role::ALL.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["Open", "High", "Low", "Close", "Volume"]);
        assert_eq!(Role::Close.ordinal(), 3);
    }

    #[test]
    fn test_view_require() {
        let close = [1.0, 2.0, 3.0];
        let view = OhlcvView::new().with(Role::Close, &close);

        assert_eq!(view.require(Role::Close).unwrap(), &close);
        assert!(matches!(
            view.require(Role::Open),
            Err(IndicatorError::MissingInput(Role::Open))
        ));
        assert_eq!(view.roles().collect::<Vec<_>>(), vec![Role::Close]);
    }

    #[test]
    fn test_view_length_check() {
        let high = [1.0, 2.0, 3.0];
        let low = [1.0, 2.0];
        let view = OhlcvView::new().with(Role::High, &high).with(Role::Low, &low);

        assert_eq!(view.len(), 3);
        assert!(view.check_lengths().is_err());
    }

    #[test]
    fn test_empty_view() {
        let view: OhlcvView<'_, f64> = OhlcvView::new();
        assert!(view.is_empty());
        assert!(view.check_lengths().is_ok());
    }
}
