//! Keyword parameters and their schemas.
//!
//! Callers pass [`Params`]; every descriptor declares a [`ParamSchema`].
//! Binding checks the caller's keywords against the schema and merges them
//! over the declared defaults, producing [`ResolvedParams`] that compute
//! functions read through typed getters.

use core::fmt;

use indexmap::IndexMap;

use crate::error::{EngineError, Result};

/// A single keyword value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// String, used for enumerated choices.
    Str(String),
}

impl ParamValue {
    /// Name of the value's type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Str(_) => "string",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Str(v) => write!(f, "'{v}'"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

/// Caller keywords, in the order they were given.
///
/// # Example
///
/// ```rust
/// use ti_accessor::Params;
///
/// let params = Params::new().with("n", 14).with("method", "iid");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: IndexMap<String, ParamValue>,
}

impl Params {
    /// Create an empty keyword set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a keyword, replacing an earlier value of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value given for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keywords were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Type and range constraint of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Integer ≥ 1.
    PositiveInt,
    /// Integer ≥ 0.
    NonNegativeInt,
    /// Finite float > 0. Integers are accepted and widened.
    PositiveFloat,
    /// Boolean flag.
    Bool,
    /// One of a fixed set of strings.
    Choice(&'static [&'static str]),
}

impl ParamKind {
    /// Check `value` against the constraint, returning the normalized value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] on a type or range violation.
    pub fn check(&self, name: &str, value: &ParamValue) -> Result<ParamValue> {
        let reject = || {
            EngineError::invalid_parameter(name, format!("expected {self}, got {value}"))
        };
        match (self, value) {
            (ParamKind::PositiveInt, ParamValue::Int(v)) if *v >= 1 => Ok(value.clone()),
            (ParamKind::NonNegativeInt, ParamValue::Int(v)) if *v >= 0 => Ok(value.clone()),
            (ParamKind::PositiveFloat, ParamValue::Float(v)) if v.is_finite() && *v > 0.0 => {
                Ok(value.clone())
            }
            (ParamKind::PositiveFloat, ParamValue::Int(v)) if *v >= 1 => {
                Ok(ParamValue::Float(*v as f64))
            }
            (ParamKind::Bool, ParamValue::Bool(_)) => Ok(value.clone()),
            (ParamKind::Choice(choices), ParamValue::Str(s)) if choices.contains(&s.as_str()) => {
                Ok(value.clone())
            }
            _ => Err(reject()),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::PositiveInt => f.write_str("a positive integer"),
            ParamKind::NonNegativeInt => f.write_str("a non-negative integer"),
            ParamKind::PositiveFloat => f.write_str("a positive number"),
            ParamKind::Bool => f.write_str("a boolean"),
            ParamKind::Choice(choices) => write!(f, "one of {}", choices.join(", ")),
        }
    }
}

/// Declaration of one keyword parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Keyword name.
    pub name: &'static str,
    /// Type and range constraint.
    pub kind: ParamKind,
    /// Value used when the caller omits the keyword.
    pub default: Option<ParamValue>,
    /// Whether the caller must supply the keyword.
    pub required: bool,
    /// One-line description for help listings.
    pub doc: &'static str,
}

impl ParamSpec {
    /// Optional parameter without a default.
    #[must_use]
    pub fn optional(name: &'static str, kind: ParamKind, doc: &'static str) -> Self {
        Self {
            name,
            kind,
            default: None,
            required: false,
            doc,
        }
    }

    /// Parameter the caller must supply.
    #[must_use]
    pub fn required(name: &'static str, kind: ParamKind, doc: &'static str) -> Self {
        Self {
            required: true,
            ..Self::optional(name, kind, doc)
        }
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Ordered parameter declarations of one indicator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSchema {
    specs: Vec<ParamSpec>,
}

impl ParamSchema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    #[must_use]
    pub fn with(mut self, spec: ParamSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Declarations in order.
    #[must_use]
    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    /// Declaration for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the indicator takes no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Bind caller keywords to the schema.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for an unknown keyword, a
    /// missing required keyword, or a value that fails its constraint.
    pub fn bind(&self, params: &Params) -> Result<ResolvedParams> {
        for (name, _) in params.iter() {
            if self.get(name).is_none() {
                let known: Vec<&str> = self.specs.iter().map(|s| s.name).collect();
                let reason = if known.is_empty() {
                    "unknown parameter (takes no parameters)".to_string()
                } else {
                    format!("unknown parameter (expected one of {})", known.join(", "))
                };
                return Err(EngineError::invalid_parameter(name, reason));
            }
        }

        let mut values = IndexMap::with_capacity(self.specs.len());
        for spec in &self.specs {
            let value = match (params.get(spec.name), &spec.default) {
                (Some(given), _) => given,
                (None, Some(default)) => default,
                (None, None) if spec.required => {
                    return Err(EngineError::invalid_parameter(
                        spec.name,
                        "missing required parameter",
                    ));
                }
                (None, None) => continue,
            };
            values.insert(spec.name, spec.kind.check(spec.name, value)?);
        }
        Ok(ResolvedParams { values })
    }
}

/// Parameters after binding: defaults merged, every value checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParams {
    values: IndexMap<&'static str, ParamValue>,
}

impl ResolvedParams {
    /// Bound value of `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Integer parameter as `usize`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is unbound or not a non-negative integer.
    pub fn usize(&self, name: &str) -> Result<usize> {
        self.opt_usize(name)?
            .ok_or_else(|| EngineError::invalid_parameter(name, "parameter not bound"))
    }

    /// Integer parameter as `usize`, `None` when unbound.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a non-negative integer.
    pub fn opt_usize(&self, name: &str) -> Result<Option<usize>> {
        match self.get(name) {
            None => Ok(None),
            Some(ParamValue::Int(v)) => usize::try_from(*v)
                .map(Some)
                .map_err(|_| EngineError::invalid_parameter(name, format!("{v} is negative"))),
            Some(other) => Err(mismatch(name, "integer", other)),
        }
    }

    /// Float parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is unbound or not a float.
    pub fn f64(&self, name: &str) -> Result<f64> {
        match self.get(name) {
            Some(ParamValue::Float(v)) => Ok(*v),
            Some(other) => Err(mismatch(name, "float", other)),
            None => Err(EngineError::invalid_parameter(name, "parameter not bound")),
        }
    }

    /// Boolean parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is unbound or not a boolean.
    pub fn bool(&self, name: &str) -> Result<bool> {
        match self.get(name) {
            Some(ParamValue::Bool(v)) => Ok(*v),
            Some(other) => Err(mismatch(name, "boolean", other)),
            None => Err(EngineError::invalid_parameter(name, "parameter not bound")),
        }
    }

    /// String parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is unbound or not a string.
    pub fn str(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(ParamValue::Str(v)) => Ok(v.as_str()),
            Some(other) => Err(mismatch(name, "string", other)),
            None => Err(EngineError::invalid_parameter(name, "parameter not bound")),
        }
    }
}

fn mismatch(name: &str, expected: &str, got: &ParamValue) -> EngineError {
    EngineError::invalid_parameter(
        name,
        format!("schema yields {}, read as {expected}", got.type_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ParamSchema {
        ParamSchema::new()
            .with(ParamSpec::optional("n", ParamKind::PositiveInt, "window").with_default(14))
            .with(ParamSpec::optional("pct", ParamKind::PositiveFloat, "threshold").with_default(0.05))
            .with(ParamSpec::optional("L", ParamKind::NonNegativeInt, "lag"))
            .with(
                ParamSpec::optional("method", ParamKind::Choice(&["iid", "cluster"]), "estimator")
                    .with_default("cluster"),
            )
    }

    #[test]
    fn test_defaults_are_merged() {
        let bound = schema().bind(&Params::new().with("n", 5)).unwrap();
        assert_eq!(bound.usize("n").unwrap(), 5);
        assert_eq!(bound.f64("pct").unwrap(), 0.05);
        assert_eq!(bound.str("method").unwrap(), "cluster");
        assert_eq!(bound.opt_usize("L").unwrap(), None);
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        let err = schema().bind(&Params::new().with("window", 5)).unwrap_err();
        match err {
            EngineError::InvalidParameter { name, reason } => {
                assert_eq!(name, "window");
                assert!(reason.contains("n, pct, L, method"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_range_checks() {
        assert!(schema().bind(&Params::new().with("n", 0)).is_err());
        assert!(schema().bind(&Params::new().with("n", -3)).is_err());
        assert!(schema().bind(&Params::new().with("L", 0)).is_ok());
        assert!(schema().bind(&Params::new().with("pct", 0.0)).is_err());
        assert!(schema().bind(&Params::new().with("pct", f64::NAN)).is_err());
        assert!(schema().bind(&Params::new().with("method", "hac")).is_err());
    }

    #[test]
    fn test_type_checks() {
        // floats never narrow to integers
        assert!(schema().bind(&Params::new().with("n", 14.0)).is_err());
        assert!(schema().bind(&Params::new().with("n", true)).is_err());
        // integers widen to floats
        let bound = schema().bind(&Params::new().with("pct", 1)).unwrap();
        assert_eq!(bound.f64("pct").unwrap(), 1.0);
    }

    #[test]
    fn test_required_parameter() {
        let schema = ParamSchema::new().with(ParamSpec::required("n", ParamKind::PositiveInt, "window"));
        let err = schema.bind(&Params::new()).unwrap_err();
        assert!(err.to_string().contains("missing required parameter"));
        assert_eq!(schema.bind(&Params::new().with("n", 3)).unwrap().usize("n").unwrap(), 3);
    }

    #[test]
    fn test_getter_type_mismatch() {
        let bound = schema().bind(&Params::new()).unwrap();
        assert!(bound.bool("n").is_err());
        assert!(bound.usize("missing").is_err());
    }
}
