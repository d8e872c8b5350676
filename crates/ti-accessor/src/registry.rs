//! Indicator Registry.
//!
//! A catalog keyed by `(scope, name)` holding each indicator's compute
//! function, parameter schema and documentation. The process-wide
//! [`Registry::global`] holds the built-ins and never changes after it is
//! first used. Custom indicators go into a caller-owned registry started from
//! [`Registry::with_builtins`]; mutation takes `&mut self`, so the caller
//! decides how to share and synchronise it.

use core::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use ti_core::{OhlcvView, Role};

use crate::builtins;
use crate::error::{EngineError, Result};
use crate::output::IndicatorOutput;
use crate::params::{ParamSchema, ResolvedParams};

/// Capability set of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Reads OHLCV roles resolved from a bar table.
    Table,
    /// Reads one given sequence.
    Sequence,
}

impl Scope {
    /// Lower-case name of the scope.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Table => "table",
            Scope::Sequence => "sequence",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs an indicator consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// Table columns for these roles.
    Roles(Vec<Role>),
    /// Exactly one positional sequence.
    Sequence,
}

impl InputSpec {
    /// Scope implied by the inputs.
    #[must_use]
    pub fn scope(&self) -> Scope {
        match self {
            InputSpec::Roles(_) => Scope::Table,
            InputSpec::Sequence => Scope::Sequence,
        }
    }

    /// Declared roles, empty for sequence inputs.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        match self {
            InputSpec::Roles(roles) => roles,
            InputSpec::Sequence => &[],
        }
    }
}

/// Inputs handed to a compute function.
#[derive(Debug, Clone, Copy)]
pub enum ComputeInput<'a> {
    /// Columns for exactly the declared roles.
    Table(OhlcvView<'a, f64>),
    /// The bound sequence.
    Sequence(&'a [f64]),
}

impl<'a> ComputeInput<'a> {
    /// The role view of a table-scoped call.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDescriptor`] for sequence input.
    pub fn table(self, name: &str) -> Result<OhlcvView<'a, f64>> {
        match self {
            ComputeInput::Table(view) => Ok(view),
            ComputeInput::Sequence(_) => Err(EngineError::InvalidDescriptor {
                name: name.to_string(),
                reason: "expected table input, got a sequence".to_string(),
            }),
        }
    }

    /// The values of a sequence-scoped call.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDescriptor`] for table input.
    pub fn sequence(self, name: &str) -> Result<&'a [f64]> {
        match self {
            ComputeInput::Sequence(values) => Ok(values),
            ComputeInput::Table(_) => Err(EngineError::InvalidDescriptor {
                name: name.to_string(),
                reason: "expected a sequence, got table input".to_string(),
            }),
        }
    }
}

/// Compute function of a registered indicator.
///
/// The result may carry a positional index; the façade stamps the bound
/// input's index onto it.
pub type ComputeFn = fn(ComputeInput<'_>, &ResolvedParams) -> Result<IndicatorOutput>;

/// Everything the registry knows about one indicator.
#[derive(Clone)]
pub struct Descriptor {
    name: String,
    title: String,
    inputs: InputSpec,
    params: ParamSchema,
    doc: String,
    compute: ComputeFn,
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("scope", &self.scope())
            .field("title", &self.title)
            .field("inputs", &self.inputs)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Descriptor {
    /// Descriptor of a table-scoped indicator reading `roles`.
    pub fn table(
        name: impl Into<String>,
        title: impl Into<String>,
        roles: &[Role],
        compute: ComputeFn,
    ) -> Self {
        Self::new(name, title, InputSpec::Roles(roles.to_vec()), compute)
    }

    /// Descriptor of a sequence-scoped indicator.
    pub fn sequence(name: impl Into<String>, title: impl Into<String>, compute: ComputeFn) -> Self {
        Self::new(name, title, InputSpec::Sequence, compute)
    }

    /// Descriptor with explicit inputs.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        inputs: InputSpec,
        compute: ComputeFn,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            inputs,
            params: ParamSchema::new(),
            doc: String::new(),
            compute,
        }
    }

    /// Set the parameter schema.
    #[must_use]
    pub fn with_params(mut self, params: ParamSchema) -> Self {
        self.params = params;
        self
    }

    /// Set the documentation text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Indicator name, case-sensitive.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability set, implied by the inputs.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.inputs.scope()
    }

    /// Human-readable title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Declared inputs.
    #[must_use]
    pub fn inputs(&self) -> &InputSpec {
        &self.inputs
    }

    /// Parameter schema.
    #[must_use]
    pub fn params(&self) -> &ParamSchema {
        &self.params
    }

    /// Documentation text.
    #[must_use]
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Compute function.
    #[must_use]
    pub fn compute(&self) -> ComputeFn {
        self.compute
    }

    fn validate(&self, scope: Scope) -> Result<()> {
        if !is_identifier(&self.name) {
            return Err(EngineError::InvalidName(self.name.clone()));
        }
        let invalid = |reason: String| EngineError::InvalidDescriptor {
            name: self.name.clone(),
            reason,
        };

        match (scope, &self.inputs) {
            (Scope::Table, InputSpec::Roles(roles)) => {
                if roles.is_empty() {
                    return Err(invalid("table indicator declares no roles".to_string()));
                }
                for (i, role) in roles.iter().enumerate() {
                    if roles[..i].contains(role) {
                        return Err(invalid(format!("role {role} declared twice")));
                    }
                }
            }
            (Scope::Sequence, InputSpec::Sequence) => {}
            (scope, inputs) => {
                return Err(invalid(format!(
                    "{} inputs cannot be registered as a {scope} indicator",
                    inputs.scope()
                )));
            }
        }

        let specs = self.params.specs();
        for (i, spec) in specs.iter().enumerate() {
            if !is_identifier(spec.name) {
                return Err(EngineError::InvalidName(spec.name.to_string()));
            }
            if specs[..i].iter().any(|earlier| earlier.name == spec.name) {
                return Err(invalid(format!("parameter '{}' declared twice", spec.name)));
            }
            if let Some(default) = &spec.default {
                spec.kind
                    .check(spec.name, default)
                    .map_err(|err| invalid(format!("bad default: {err}")))?;
            }
        }
        Ok(())
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::with_builtins);

/// Catalog of indicators keyed by `(scope, name)`.
///
/// Registration fails fast on a duplicate key; the first registration stays.
/// Listings follow insertion order.
///
/// # Example
///
/// ```rust
/// use ti_accessor::{Registry, Scope};
///
/// let names = Registry::global().names(Scope::Sequence);
/// assert_eq!(names, vec!["SMA", "EMA"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<(Scope, String), Descriptor>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in indicators.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in builtins::descriptors() {
            let key = (descriptor.scope(), descriptor.name.clone());
            registry.entries.insert(key, descriptor);
        }
        tracing::debug!(indicators = registry.len(), "built-in indicators registered");
        registry
    }

    /// The process-wide registry of built-ins, created on first use.
    ///
    /// It cannot be extended; custom indicators need their own registry.
    #[must_use]
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Add an indicator under `scope`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidName`] if the name or a parameter name is not
    ///   an identifier
    /// - [`EngineError::InvalidDescriptor`] if the inputs do not fit `scope`
    /// - [`EngineError::DuplicateIndicator`] if `(scope, name)` is taken
    pub fn register(&mut self, scope: Scope, descriptor: Descriptor) -> Result<()> {
        descriptor.validate(scope)?;
        let key = (scope, descriptor.name.clone());
        if self.entries.contains_key(&key) {
            return Err(EngineError::DuplicateIndicator {
                scope,
                name: key.1,
            });
        }
        tracing::debug!(%scope, name = %key.1, "indicator registered");
        self.entries.insert(key, descriptor);
        Ok(())
    }

    /// Descriptor registered under `(scope, name)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownIndicator`] if there is none.
    pub fn lookup(&self, scope: Scope, name: &str) -> Result<&Descriptor> {
        self.entries
            .get(&(scope, name.to_string()))
            .ok_or_else(|| EngineError::UnknownIndicator {
                scope,
                name: name.to_string(),
            })
    }

    /// Whether `(scope, name)` is registered.
    #[must_use]
    pub fn contains(&self, scope: Scope, name: &str) -> bool {
        self.entries.contains_key(&(scope, name.to_string()))
    }

    /// Descriptors of `scope` in registration order.
    pub fn list(&self, scope: Scope) -> impl Iterator<Item = &Descriptor> {
        self.entries
            .iter()
            .filter(move |((s, _), _)| *s == scope)
            .map(|(_, descriptor)| descriptor)
    }

    /// Names of `scope` in registration order.
    #[must_use]
    pub fn names(&self, scope: Scope) -> Vec<&str> {
        self.list(scope).map(Descriptor::name).collect()
    }

    /// Same as [`lookup`](Self::lookup); reads as the help entry point.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownIndicator`] if there is none.
    pub fn describe(&self, scope: Scope, name: &str) -> Result<&Descriptor> {
        self.lookup(scope, name)
    }

    /// Number of registered indicators across both scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
