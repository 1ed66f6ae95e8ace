// ── Diagnostics ──
//
// Everything the provider reports back to the runtime is a diagnostic with
// a summary line and a detail paragraph. Errors from every layer funnel in
// here.

use leaseweb_config::ConfigError;
use leaseweb_core::CoreError;

use crate::state::StateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Attribute the diagnostic is about, if any.
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(summary, detail)
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.summary)?;
        if let Some(attr) = &self.attribute {
            write!(f, " ({attr})")?;
        }
        if !self.detail.is_empty() {
            write!(f, "\n{}", self.detail)?;
        }
        Ok(())
    }
}

impl From<&CoreError> for Diagnostic {
    fn from(err: &CoreError) -> Self {
        Self::error(err.summary(), err.detail())
    }
}

impl From<&ConfigError> for Diagnostic {
    fn from(err: &ConfigError) -> Self {
        let diag = Self::error("Unable to configure the Leaseweb provider", err.to_string());
        match err.field() {
            Some(field) => diag.with_attribute(field),
            None => diag,
        }
    }
}

impl From<&StateError> for Diagnostic {
    fn from(err: &StateError) -> Self {
        let diag = Self::error("Invalid attribute value", err.to_string());
        match err {
            StateError::Type { attribute, .. } => diag.with_attribute(attribute.clone()),
            StateError::Decode(_) => diag,
        }
    }
}

// ── Collection ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    /// `Err(self)` when any error was collected.
    pub fn into_result(self) -> Result<(), Diagnostics> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl From<CoreError> for Diagnostics {
    fn from(err: CoreError) -> Self {
        Diagnostic::from(&err).into()
    }
}

impl From<ConfigError> for Diagnostics {
    fn from(err: ConfigError) -> Self {
        Diagnostic::from(&err).into()
    }
}

impl From<StateError> for Diagnostics {
    fn from(err: StateError) -> Self {
        Diagnostic::from(&err).into()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
