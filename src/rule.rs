//! Lint rule trait

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::document::Document;

/// Category a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    /// Declaration and member ordering
    Ordering,
    /// Stylistic concerns
    Style,
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleCategory::Ordering => write!(f, "ordering"),
            RuleCategory::Style => write!(f, "style"),
        }
    }
}

/// A lint rule that checks a parsed document
pub trait LintRule: Send + Sync {
    /// Unique rule identifier (e.g. "sort-keys")
    fn id(&self) -> &'static str;

    /// One-line description of what the rule checks
    fn description(&self) -> &'static str;

    /// Category for grouping in output and docs
    fn category(&self) -> RuleCategory;

    /// Run the rule against a document, collecting diagnostics.
    ///
    /// Implementations must honor inline disable comments via
    /// [`Document::is_rule_disabled`] and produce at most one fix per
    /// diagnostic.
    fn check(&self, doc: &Document, config: &Config) -> Vec<Diagnostic>;
}
