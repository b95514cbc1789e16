//! JSON output formatter

use super::OutputFormatter;
use crate::diagnostic::{Diagnostic, Severity};
use crate::engine::LintResult;
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    diagnostics: Vec<JsonDiagnostic<'a>>,
    failures: Vec<JsonFailure<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    rule_id: &'a str,
    severity: &'a str,
    message: &'a str,
    file: String,
    line: usize,
    column: usize,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_line: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    notes: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<JsonFix<'a>>,
}

#[derive(Serialize)]
struct JsonFix<'a> {
    description: &'a str,
    start: usize,
    end: usize,
    replacement: &'a str,
    safety: String,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    file: String,
    message: &'a str,
}

#[derive(Serialize)]
struct JsonSummary {
    files_checked: usize,
    error_count: usize,
    warning_count: usize,
    fixable_count: usize,
    duration_ms: u128,
}

fn severity_str(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    }
}

fn to_json<'a>(d: &'a Diagnostic) -> JsonDiagnostic<'a> {
    JsonDiagnostic {
        rule_id: &d.rule_id,
        severity: severity_str(d.severity),
        message: &d.message,
        file: d.location.file.display().to_string(),
        line: d.location.line,
        column: d.location.column,
        length: d.location.length,
        source_line: d.source_line.as_deref(),
        help: d.help.as_deref(),
        notes: d.notes.iter().map(|n| n.as_str()).collect(),
        fix: d.fix.as_ref().map(|f| JsonFix {
            description: &f.description,
            start: f.start,
            end: f.end,
            replacement: &f.replacement,
            safety: f.safety.to_string(),
        }),
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &LintResult) -> String {
        let output = JsonOutput {
            diagnostics: result.diagnostics.iter().map(to_json).collect(),
            failures: result
                .failures
                .iter()
                .map(|(path, message)| JsonFailure {
                    file: path.display().to_string(),
                    message,
                })
                .collect(),
            summary: JsonSummary {
                files_checked: result.files_checked,
                error_count: result.error_count(),
                warning_count: result.warning_count(),
                fixable_count: result.fixable_count(),
                duration_ms: result.duration.as_millis(),
            },
        };

        let serialized = if self.pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        };
        serialized.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let json = to_json(diagnostic);
        let serialized = if self.pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        serialized.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}
