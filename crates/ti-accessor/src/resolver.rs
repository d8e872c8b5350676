//! Column Resolver.
//!
//! Maps the five OHLCV roles onto the column labels of a bar table. Each role
//! is resolved from a caller override when one is set, otherwise from the
//! first label of [`CANDIDATES`] present in the table. Matching is exact: case
//! variants are spelled out in the table instead of folding case.

use ti_core::{DataFrame, Role, TaFloat};

use crate::error::{EngineError, Result};

/// Accepted column labels per role, in priority order.
///
/// Single lower-case letters come last so that a full word always wins.
pub static CANDIDATES: [(Role, &[&str]); 5] = [
    (Role::Open, &["Open", "OPEN", "open", "O", "PriceOpen", "o"]),
    (Role::High, &["High", "HIGH", "high", "H", "PriceHigh", "h"]),
    (Role::Low, &["Low", "LOW", "low", "L", "PriceLow", "l"]),
    (
        Role::Close,
        &["Close", "CLOSE", "close", "C", "PriceClose", "Adj Close", "c"],
    ),
    (
        Role::Volume,
        &["Volume", "VOLUME", "volume", "Vol", "VOL", "vol", "V", "v"],
    ),
];

/// Candidate labels for one role.
#[must_use]
pub fn candidates(role: Role) -> &'static [&'static str] {
    CANDIDATES[role.ordinal()].1
}

/// Result of resolving the five roles against one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [Option<String>; 5],
    overrides: [Option<String>; 5],
}

impl ColumnMap {
    /// Label resolved for `role`, if any.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<&str> {
        self.columns[role.ordinal()].as_deref()
    }

    /// Label resolved for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingInput`] naming the role and every label
    /// that was tried.
    pub fn require(&self, role: Role) -> Result<&str> {
        self.get(role).ok_or_else(|| EngineError::MissingInput {
            role,
            candidates: self.attempted(role),
        })
    }

    /// Labels tried for `role`: the override alone if one was set, otherwise
    /// the candidate table.
    #[must_use]
    pub fn attempted(&self, role: Role) -> Vec<String> {
        match &self.overrides[role.ordinal()] {
            Some(label) => vec![label.clone()],
            None => candidates(role).iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Roles that could not be resolved, in canonical order.
    #[must_use]
    pub fn unresolved(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }

    /// Whether all five roles resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.columns.iter().all(Option::is_some)
    }

    /// `(role, label)` pairs in canonical role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Option<&str>)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// Resolves roles to labels, holding the caller's overrides.
///
/// Overrides are merged additively: setting one role leaves the others as
/// they were.
///
/// # Example
///
/// ```rust
/// use ti_accessor::ColumnResolver;
/// use ti_core::{DataFrame, Role};
///
/// let df: DataFrame<f64> = DataFrame::from_columns(vec![
///     ("h", vec![2.0]),
///     ("low", vec![1.0]),
///     ("Last", vec![1.5]),
/// ])
/// .unwrap();
///
/// let resolver = ColumnResolver::new().with_override(Role::Close, "Last");
/// let map = resolver.resolve(&df);
/// assert_eq!(map.get(Role::High), Some("h"));
/// assert_eq!(map.get(Role::Close), Some("Last"));
/// assert_eq!(map.unresolved(), vec![Role::Open, Role::Volume]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnResolver {
    overrides: [Option<String>; 5],
}

impl ColumnResolver {
    /// Create a resolver without overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set_override`](Self::set_override).
    #[must_use]
    pub fn with_override(mut self, role: Role, label: impl Into<String>) -> Self {
        self.set_override(role, label);
        self
    }

    /// Map `role` to `label`, replacing any earlier override for that role.
    pub fn set_override(&mut self, role: Role, label: impl Into<String>) {
        self.overrides[role.ordinal()] = Some(label.into());
    }

    /// Drop the override for `role`, returning it.
    pub fn clear_override(&mut self, role: Role) -> Option<String> {
        self.overrides[role.ordinal()].take()
    }

    /// Override currently set for `role`.
    #[must_use]
    pub fn override_for(&self, role: Role) -> Option<&str> {
        self.overrides[role.ordinal()].as_deref()
    }

    /// Resolve every role against the table's column labels.
    ///
    /// An override is authoritative: if it names a column the table lacks,
    /// the role stays unresolved rather than falling back to the candidates.
    #[must_use]
    pub fn resolve<T: TaFloat>(&self, table: &DataFrame<T>) -> ColumnMap {
        let mut map = ColumnMap {
            columns: Default::default(),
            overrides: self.overrides.clone(),
        };

        for role in Role::ALL {
            let found = match self.override_for(role) {
                Some(label) => table.has_column(label).then(|| label.to_string()),
                None => candidates(role)
                    .iter()
                    .find(|label| table.has_column(label))
                    .map(|label| (*label).to_string()),
            };
            match &found {
                Some(label) => tracing::trace!(%role, column = %label, "role resolved"),
                None => tracing::trace!(%role, "role unresolved"),
            }
            map.columns[role.ordinal()] = found;
        }

        tracing::debug!(unresolved = ?map.unresolved(), "columns resolved");
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(labels: &[&str]) -> DataFrame<f64> {
        DataFrame::from_columns(labels.iter().map(|l| (*l, vec![1.0, 2.0])).collect()).unwrap()
    }

    #[test]
    fn test_candidate_table_covers_every_role_in_order() {
        for (i, (role, names)) in CANDIDATES.iter().enumerate() {
            assert_eq!(role.ordinal(), i);
            assert_eq!(names[0], role.as_str());
        }
    }

    #[test]
    fn test_resolves_common_spellings() {
        let map = ColumnResolver::new().resolve(&table(&["OPEN", "h", "Low", "Adj Close", "Vol"]));
        assert_eq!(map.get(Role::Open), Some("OPEN"));
        assert_eq!(map.get(Role::High), Some("h"));
        assert_eq!(map.get(Role::Low), Some("Low"));
        assert_eq!(map.get(Role::Close), Some("Adj Close"));
        assert_eq!(map.get(Role::Volume), Some("Vol"));
        assert!(map.is_complete());
    }

    #[test]
    fn test_priority_order_prefers_full_words() {
        let map = ColumnResolver::new().resolve(&table(&["c", "close", "Close"]));
        assert_eq!(map.get(Role::Close), Some("Close"));

        let map = ColumnResolver::new().resolve(&table(&["c", "C"]));
        assert_eq!(map.get(Role::Close), Some("C"));
    }

    #[test]
    fn test_matching_is_exact() {
        let map = ColumnResolver::new().resolve(&table(&["cLoSe", "Highs"]));
        assert_eq!(map.get(Role::Close), None);
        assert_eq!(map.get(Role::High), None);
    }

    #[test]
    fn test_override_wins_and_is_additive() {
        let resolver = ColumnResolver::new()
            .with_override(Role::Close, "last")
            .with_override(Role::High, "max");
        let map = resolver.resolve(&table(&["Close", "last", "max", "High"]));
        assert_eq!(map.get(Role::Close), Some("last"));
        assert_eq!(map.get(Role::High), Some("max"));
    }

    #[test]
    fn test_missing_override_column_is_unresolved() {
        let resolver = ColumnResolver::new().with_override(Role::Close, "last");
        let map = resolver.resolve(&table(&["Close"]));
        assert_eq!(map.get(Role::Close), None);
        assert_eq!(map.attempted(Role::Close), vec!["last".to_string()]);
    }

    #[test]
    fn test_require_reports_candidates() {
        let map = ColumnResolver::new().resolve(&table(&["Close"]));
        match map.require(Role::High) {
            Err(EngineError::MissingInput { role, candidates }) => {
                assert_eq!(role, Role::High);
                assert_eq!(candidates.len(), 6);
                assert_eq!(candidates[0], "High");
            }
            other => panic!("expected MissingInput, got {other:?}"),
        }
    }

    #[test]
    fn test_clear_override_restores_default() {
        let mut resolver = ColumnResolver::new().with_override(Role::Close, "last");
        assert_eq!(resolver.clear_override(Role::Close).as_deref(), Some("last"));
        let map = resolver.resolve(&table(&["Close", "last"]));
        assert_eq!(map.get(Role::Close), Some("Close"));
    }
}
