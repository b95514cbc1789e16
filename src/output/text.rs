//! Human-readable text output formatter

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;
use colored::*;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show source context
    pub show_source: bool,

    /// Show help text
    pub show_help: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_source: true,
            show_help: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
            Severity::Info => s.blue(),
        }
    }

    fn format_location(&self, diag: &Diagnostic) -> String {
        format!(
            "{}:{}:{}",
            diag.location.file.display(),
            diag.location.line,
            diag.location.column
        )
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        for diag in &result.diagnostics {
            output.push_str(&self.format_diagnostic(diag));
            output.push('\n');
        }

        for (path, message) in &result.failures {
            let line = format!("{}: failed: {}", path.display(), message);
            if self.colored {
                output.push_str(&format!("{}\n", line.red()));
            } else {
                output.push_str(&line);
                output.push('\n');
            }
        }

        if self.show_stats {
            output.push_str(&format!(
                "\n{} {} checked",
                result.files_checked,
                if result.files_checked == 1 {
                    "file"
                } else {
                    "files"
                }
            ));

            let mut counts = Vec::new();
            let errors = result.error_count();
            let warnings = result.warning_count();
            if errors > 0 {
                let s = format!("{} {}", errors, if errors == 1 { "error" } else { "errors" });
                counts.push(if self.colored { s.red().to_string() } else { s });
            }
            if warnings > 0 {
                let s = format!(
                    "{} {}",
                    warnings,
                    if warnings == 1 { "warning" } else { "warnings" }
                );
                counts.push(if self.colored {
                    s.yellow().to_string()
                } else {
                    s
                });
            }
            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            let fixable = result.fixable_count();
            if fixable > 0 {
                output.push_str(&format!(
                    "{} {} fixable with --fix\n",
                    fixable,
                    if fixable == 1 { "issue" } else { "issues" }
                ));
            }

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                result.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_diagnostic(&self, diag: &Diagnostic) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}: {}[{}]: {}\n",
            self.format_location(diag),
            self.severity_str(diag.severity),
            if self.colored {
                diag.rule_id.cyan().to_string()
            } else {
                diag.rule_id.clone()
            },
            diag.message
        ));

        if self.show_source {
            if let Some(source_line) = &diag.source_line {
                let gutter = if self.colored {
                    "|".blue().to_string()
                } else {
                    "|".to_string()
                };
                output.push_str(&format!("   {} {}\n", gutter, source_line));
                if diag.location.length > 0 {
                    let marker = format!(
                        "{}{}",
                        " ".repeat(diag.location.column.saturating_sub(1)),
                        "^".repeat(diag.location.length.min(source_line.len()))
                    );
                    output.push_str(&format!("   {} {}\n", gutter, marker));
                }
            }
        }

        if self.show_help {
            if let Some(help) = &diag.help {
                output.push_str(&format!("   = help: {}\n", help));
            }
        }
        for note in &diag.notes {
            output.push_str(&format!("   = note: {}\n", note));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Location;
    use std::path::PathBuf;

    fn diag() -> Diagnostic {
        Diagnostic::new(
            "sort-keys",
            Severity::Warning,
            "Property 'a' should come before 'b'",
            Location::new(PathBuf::from("t.js"), 1, 13).with_length(4),
        )
        .with_source_line("const o = { b: 1, a: 2 };")
        .with_help("Object literal properties should be sorted")
    }

    #[test]
    fn test_format_diagnostic_plain() {
        let formatter = TextFormatter::new().without_color();
        let out = formatter.format_diagnostic(&diag());
        assert!(out.contains("t.js:1:13: warning[sort-keys]"));
        assert!(out.contains("const o = { b: 1, a: 2 };"));
        assert!(out.contains("= help:"));
    }

    #[test]
    fn test_stats_line() {
        let formatter = TextFormatter::new().without_color();
        let result = LintResult {
            diagnostics: vec![diag()],
            files_checked: 3,
            ..Default::default()
        };
        let out = formatter.format(&result);
        assert!(out.contains("3 files checked: 1 warning"));
    }

    #[test]
    fn test_note_rendered() {
        let formatter = TextFormatter::new().without_color();
        let d = diag().with_note("not auto-fixable: the run contains an unnamed member");
        let out = formatter.format_diagnostic(&d);
        assert!(out.contains("= note: not auto-fixable"));
    }
}
