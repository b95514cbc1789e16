//! Diagnostic types for linting results

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for diagnostics
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning - potential issue
    #[default]
    Warning,
    /// Error - definite problem
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" | "hint" | "note" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// Fix safety classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixSafety {
    /// Safe fix - preserves code meaning, can be applied automatically
    #[default]
    Safe,
    /// Unsafe fix - may change runtime behavior
    Unsafe,
}

impl std::fmt::Display for FixSafety {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixSafety::Safe => write!(f, "safe"),
            FixSafety::Unsafe => write!(f, "unsafe"),
        }
    }
}

/// Source code location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    /// File path
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Length of the highlighted region in bytes
    pub length: usize,
}

impl Location {
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            length: 0,
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}

/// A suggested fix: a single text-range replacement.
///
/// Exactly one fix is attached to a diagnostic; the fixer applies one fix per
/// file per pass and re-lints the result, so overlapping edits never occur.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fix {
    /// Description of the fix
    pub description: String,
    /// Start byte offset of the replaced range
    pub start: usize,
    /// End byte offset of the replaced range (exclusive)
    pub end: usize,
    /// The replacement text
    pub replacement: String,
    /// Safety classification of this fix
    #[serde(default)]
    pub safety: FixSafety,
}

impl Fix {
    /// Create a new safe fix
    pub fn safe(description: &str, start: usize, end: usize, replacement: String) -> Self {
        Self {
            description: description.to_string(),
            start,
            end,
            replacement,
            safety: FixSafety::Safe,
        }
    }

    /// Create a new unsafe fix
    pub fn unsafe_fix(description: &str, start: usize, end: usize, replacement: String) -> Self {
        Self {
            description: description.to_string(),
            start,
            end,
            replacement,
            safety: FixSafety::Unsafe,
        }
    }

    /// Check if this fix is safe to apply automatically
    pub fn is_safe(&self) -> bool {
        self.safety == FixSafety::Safe
    }

    /// Apply this fix to source text, returning the mutated text.
    ///
    /// Returns `None` if the range does not lie on byte boundaries of the
    /// content (a stale fix against mutated text).
    pub fn apply(&self, content: &str) -> Option<String> {
        if self.start > self.end
            || self.end > content.len()
            || !content.is_char_boundary(self.start)
            || !content.is_char_boundary(self.end)
        {
            return None;
        }
        let mut out = String::with_capacity(content.len() + self.replacement.len());
        out.push_str(&content[..self.start]);
        out.push_str(&self.replacement);
        out.push_str(&content[self.end..]);
        Some(out)
    }
}

/// A lint diagnostic (warning, error, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule ID that triggered this diagnostic
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Source location
    pub location: Location,
    /// The source line (for display)
    pub source_line: Option<String>,
    /// Help text (usually rule description)
    pub help: Option<String>,
    /// Suggested fix
    pub fix: Option<Fix>,
    /// Additional notes
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(rule_id: &str, severity: Severity, message: &str, location: Location) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            location,
            source_line: None,
            help: None,
            fix: None,
            notes: Vec::new(),
        }
    }

    /// Add source line for display
    pub fn with_source_line(mut self, line: &str) -> Self {
        self.source_line = Some(line.to_string());
        self
    }

    /// Add help text
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Attach a fix
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: &str) -> Self {
        self.notes.push(note.to_string());
        self
    }

    /// Check if this diagnostic has a fix
    pub fn has_fix(&self) -> bool {
        self.fix.is_some()
    }

    /// Check if this diagnostic has a safe fix
    pub fn has_safe_fix(&self) -> bool {
        self.fix.as_ref().is_some_and(|f| f.is_safe())
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("hint".parse::<Severity>(), Ok(Severity::Info));
    }

    #[test]
    fn test_fix_apply() {
        let fix = Fix::safe("reorder", 4, 9, "a, b".to_string());
        assert_eq!(fix.apply("let [b , a] = x;").as_deref(), Some("let [a, b] = x;"));
    }

    #[test]
    fn test_fix_apply_out_of_bounds() {
        let fix = Fix::safe("reorder", 10, 20, "x".to_string());
        assert!(fix.apply("short").is_none());
    }

    #[test]
    fn test_fix_apply_char_boundary() {
        // 'é' is two bytes; offset 1 splits it
        let fix = Fix::safe("bad", 1, 2, "x".to_string());
        assert!(fix.apply("é").is_none());
    }

    #[test]
    fn test_diagnostic_builder() {
        let loc = Location::new(PathBuf::from("test.js"), 10, 5).with_length(3);
        let diag = Diagnostic::new("sort-keys", Severity::Warning, "out of order", loc)
            .with_source_line("  b: 1,")
            .with_help("keys should be sorted")
            .with_note("run with --fix");

        assert_eq!(diag.rule_id, "sort-keys");
        assert!(diag.is_warning());
        assert!(!diag.has_fix());
        assert_eq!(diag.location.length, 3);
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn test_diagnostic_with_fix() {
        let loc = Location::new(PathBuf::from("test.js"), 1, 1);
        let diag = Diagnostic::new("sort-keys", Severity::Warning, "m", loc)
            .with_fix(Fix::safe("sort properties", 0, 4, "a, b".to_string()));
        assert!(diag.has_fix());
        assert!(diag.has_safe_fix());
    }
}
