//! Compact output formatter
//!
//! One line per diagnostic, minimal output for scripting.

use super::OutputFormatter;
use crate::diagnostic::Diagnostic;
use crate::engine::LintResult;

/// Compact one-line-per-diagnostic formatter
pub struct CompactFormatter {
    /// Show severity prefix
    pub show_severity: bool,
    /// Show rule ID
    pub show_rule: bool,
}

impl CompactFormatter {
    /// Create a new compact formatter
    pub fn new() -> Self {
        Self {
            show_severity: true,
            show_rule: true,
        }
    }

    /// Hide severity prefix
    pub fn without_severity(mut self) -> Self {
        self.show_severity = false;
        self
    }

    /// Hide rule ID
    pub fn without_rule(mut self) -> Self {
        self.show_rule = false;
        self
    }
}

impl Default for CompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();
        for diag in &result.diagnostics {
            output.push_str(&self.format_diagnostic(diag));
            output.push('\n');
        }
        for (path, message) in &result.failures {
            output.push_str(&format!("{}: error: {}\n", path.display(), message));
        }
        output
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut parts = Vec::new();

        parts.push(format!(
            "{}:{}:{}",
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column
        ));

        if self.show_severity {
            parts.push(diagnostic.severity.to_string());
        }

        if self.show_rule {
            parts.push(diagnostic.rule_id.clone());
        }

        parts.push(diagnostic.message.clone());
        parts.join(": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Location, Severity};
    use std::path::PathBuf;

    #[test]
    fn test_compact_line() {
        let diag = Diagnostic::new(
            "sort-exports",
            Severity::Warning,
            "Export 'a' should come before 'b'",
            Location::new(PathBuf::from("src/t.ts"), 2, 1),
        );
        let out = CompactFormatter::new().format_diagnostic(&diag);
        assert_eq!(
            out,
            "src/t.ts:2:1: warning: sort-exports: Export 'a' should come before 'b'"
        );
    }

    #[test]
    fn test_without_severity_and_rule() {
        let diag = Diagnostic::new(
            "sort-keys",
            Severity::Warning,
            "m",
            Location::new(PathBuf::from("a.js"), 1, 1),
        );
        let out = CompactFormatter::new()
            .without_severity()
            .without_rule()
            .format_diagnostic(&diag);
        assert_eq!(out, "a.js:1:1: m");
    }
}
